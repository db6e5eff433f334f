// Page requests, page results and filter predicates.
//
// Purpose
// - Describe a windowed, ordered, optionally filtered read independent of any storage engine.
// - Compile the wire-level filter and sort keys against an entity kind's fields once, so
//   unknown fields and mistyped values fail before a store touches any row.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use thiserror::Error;

use crate::shared::core::entity::{Accessor, Entity, accessor};
use crate::shared::core::fields::{FieldKind, FieldValue};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{kind} has no field named '{field}'")]
    UnknownField { kind: &'static str, field: String },

    #[error("value for '{field}' must be {expected}")]
    TypeMismatch { field: String, expected: FieldKind },

    #[error("'{field}' is not a text field and cannot be searched")]
    NotSearchable { field: String },

    #[error("page size must be at least 1")]
    EmptyPage,

    #[error("page size {requested} exceeds the maximum of {max}")]
    PageTooLarge { requested: u64, max: u64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub offset: u64,
    pub size: u64,
    #[serde(default)]
    pub sort: Vec<SortKey>,
}

impl PageRequest {
    pub fn new(offset: u64, size: u64) -> Self {
        Self {
            offset,
            size,
            sort: Vec::new(),
        }
    }

    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult<E> {
    pub items: Vec<E>,
    pub total_count: u64,
}

impl<E> PageResult<E> {
    pub fn map<T>(self, f: impl FnMut(E) -> T) -> PageResult<T> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
        }
    }
}

/// Wire-level filter. Values are raw JSON and get typed against the field on compile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Filter {
    Eq {
        field: String,
        value: Value,
    },
    Range {
        field: String,
        #[serde(default)]
        min: Option<Value>,
        #[serde(default)]
        max: Option<Value>,
    },
    Contains {
        field: String,
        value: String,
    },
    And {
        filters: Vec<Filter>,
    },
    Or {
        filters: Vec<Filter>,
    },
    Not {
        filter: Box<Filter>,
    },
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn range(
        field: impl Into<String>,
        min: Option<impl Into<Value>>,
        max: Option<impl Into<Value>>,
    ) -> Self {
        Filter::Range {
            field: field.into(),
            min: min.map(Into::into),
            max: max.map(Into::into),
        }
    }

    pub fn compile<E: Entity>(&self) -> Result<Predicate<E>, QueryError> {
        match self {
            Filter::Eq { field, value } => {
                let accessor = accessor::<E>(field)?;
                let value = typed(&accessor, value)?;
                Ok(Predicate::Eq(accessor, value))
            }
            Filter::Range { field, min, max } => {
                let accessor = accessor::<E>(field)?;
                let min = min.as_ref().map(|v| typed(&accessor, v)).transpose()?;
                let max = max.as_ref().map(|v| typed(&accessor, v)).transpose()?;
                Ok(Predicate::Range { accessor, min, max })
            }
            Filter::Contains { field, value } => {
                let accessor = accessor::<E>(field)?;
                if accessor.kind != FieldKind::Text {
                    return Err(QueryError::NotSearchable {
                        field: field.clone(),
                    });
                }
                Ok(Predicate::Contains(accessor, value.to_lowercase()))
            }
            Filter::And { filters } => Ok(Predicate::And(compile_all(filters)?)),
            Filter::Or { filters } => Ok(Predicate::Or(compile_all(filters)?)),
            Filter::Not { filter } => Ok(Predicate::Not(Box::new(filter.compile()?))),
        }
    }
}

fn compile_all<E: Entity>(filters: &[Filter]) -> Result<Vec<Predicate<E>>, QueryError> {
    filters.iter().map(Filter::compile).collect()
}

fn typed<E>(accessor: &Accessor<E>, value: &Value) -> Result<FieldValue, QueryError> {
    accessor
        .kind
        .coerce(value)
        .ok_or_else(|| QueryError::TypeMismatch {
            field: accessor.name.to_owned(),
            expected: accessor.kind,
        })
}

/// A filter bound to one entity kind, ready to be evaluated row by row.
pub enum Predicate<E> {
    Eq(Accessor<E>, FieldValue),
    Range {
        accessor: Accessor<E>,
        min: Option<FieldValue>,
        max: Option<FieldValue>,
    },
    Contains(Accessor<E>, String),
    And(Vec<Predicate<E>>),
    Or(Vec<Predicate<E>>),
    Not(Box<Predicate<E>>),
}

impl<E> Predicate<E> {
    pub fn matches(&self, entity: &E) -> bool {
        match self {
            Predicate::Eq(accessor, expected) => (accessor.get)(entity) == *expected,
            Predicate::Range { accessor, min, max } => {
                let actual = (accessor.get)(entity);
                actual != FieldValue::Null
                    && min.as_ref().is_none_or(|min| actual >= *min)
                    && max.as_ref().is_none_or(|max| actual <= *max)
            }
            Predicate::Contains(accessor, needle) => match (accessor.get)(entity) {
                FieldValue::Text(text) => text.to_lowercase().contains(needle.as_str()),
                _ => false,
            },
            Predicate::And(all) => all.iter().all(|p| p.matches(entity)),
            Predicate::Or(any) => any.iter().any(|p| p.matches(entity)),
            Predicate::Not(inner) => !inner.matches(entity),
        }
    }
}

/// Compiled filter: absent means every row matches.
pub fn compile_filter<E: Entity>(filter: Option<&Filter>) -> Result<Option<Predicate<E>>, QueryError> {
    filter.map(Filter::compile).transpose()
}

/// Sort keys resolved against an entity kind. The identifier is always the last tie-break.
pub struct SortOrder<E> {
    keys: Vec<(Accessor<E>, SortDirection)>,
}

impl<E: Entity> SortOrder<E> {
    pub fn compile(keys: &[SortKey]) -> Result<Self, QueryError> {
        let keys = keys
            .iter()
            .map(|key| accessor::<E>(&key.field).map(|a| (a, key.direction)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { keys })
    }

    pub fn compare(&self, left: &E, right: &E) -> Ordering {
        self.keys
            .iter()
            .map(|(accessor, direction)| {
                let ordering = (accessor.get)(left).cmp(&(accessor.get)(right));
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| left.id().cmp(&right.id()))
    }
}

#[cfg(test)]
mod query_tests {
    use super::*;
    use crate::shared::core::fields::{FieldDescriptor, FieldRegistry};
    use crate::shared::core::primitives::{EntityId, VersionStamp};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::sync::LazyLock;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Book {
        id: Option<EntityId>,
        version: VersionStamp,
        title: String,
        pages: i64,
        published: Option<NaiveDate>,
    }

    static BOOK_FIELDS: LazyLock<FieldRegistry<Book>> = LazyLock::new(|| {
        FieldRegistry::new(vec![
            FieldDescriptor::new(
                "title",
                FieldKind::Text,
                |b: &Book| FieldValue::text(&b.title),
                |b: &mut Book, v: FieldValue| {
                    b.title = v.into_text();
                    Ok(())
                },
            ),
            FieldDescriptor::new(
                "pages",
                FieldKind::Integer,
                |b: &Book| FieldValue::Integer(b.pages),
                |b: &mut Book, v: FieldValue| {
                    if let FieldValue::Integer(n) = v {
                        b.pages = n;
                    }
                    Ok(())
                },
            ),
            FieldDescriptor::new(
                "published",
                FieldKind::Date,
                |b: &Book| FieldValue::optional_date(b.published),
                |b: &mut Book, v: FieldValue| {
                    b.published = v.into_optional_date();
                    Ok(())
                },
            ),
        ])
    });

    impl Entity for Book {
        const KIND: &'static str = "Book";

        fn id(&self) -> Option<EntityId> {
            self.id
        }

        fn version(&self) -> VersionStamp {
            self.version
        }

        fn set_identity(&mut self, id: Option<EntityId>, version: VersionStamp) {
            self.id = id;
            self.version = version;
        }

        fn fields() -> &'static FieldRegistry<Self> {
            &BOOK_FIELDS
        }
    }

    fn book(id: u64, title: &str, pages: i64, published: Option<(i32, u32, u32)>) -> Book {
        Book {
            id: Some(EntityId::new(id)),
            version: 0,
            title: title.into(),
            pages,
            published: published.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        }
    }

    #[fixture]
    fn shelf() -> Vec<Book> {
        vec![
            book(1, "Dune", 412, Some((1965, 8, 1))),
            book(2, "Neuromancer", 271, Some((1984, 7, 1))),
            book(3, "Hyperion", 482, None),
            book(4, "dune messiah", 256, Some((1969, 10, 15))),
        ]
    }

    fn matching(shelf: &[Book], filter: Filter) -> Vec<u64> {
        let predicate = filter.compile::<Book>().expect("compile failed");
        shelf
            .iter()
            .filter(|b| predicate.matches(b))
            .filter_map(|b| b.id.map(EntityId::value))
            .collect()
    }

    #[rstest]
    fn it_should_match_on_equality(shelf: Vec<Book>) {
        assert_eq!(matching(&shelf, Filter::eq("pages", 271)), vec![2]);
        assert_eq!(matching(&shelf, Filter::eq("id", 3)), vec![3]);
        assert_eq!(matching(&shelf, Filter::eq("published", json!(null))), vec![3]);
    }

    #[rstest]
    fn it_should_match_an_inclusive_range_and_skip_nulls(shelf: Vec<Book>) {
        let filter = Filter::range("published", Some("1965-08-01"), Some("1970-01-01"));
        assert_eq!(matching(&shelf, filter), vec![1, 4]);
        let open_ended = Filter::range("pages", Some(400), None::<i64>);
        assert_eq!(matching(&shelf, open_ended), vec![1, 3]);
    }

    #[rstest]
    fn it_should_match_substrings_case_insensitively(shelf: Vec<Book>) {
        assert_eq!(matching(&shelf, Filter::contains("title", "DUNE")), vec![1, 4]);
    }

    #[rstest]
    fn it_should_compose_filters(shelf: Vec<Book>) {
        let filter = Filter::Or {
            filters: vec![
                Filter::And {
                    filters: vec![
                        Filter::contains("title", "dune"),
                        Filter::Not {
                            filter: Box::new(Filter::eq("id", 1)),
                        },
                    ],
                },
                Filter::eq("title", "Hyperion"),
            ],
        };
        assert_eq!(matching(&shelf, filter), vec![3, 4]);
    }

    #[rstest]
    fn it_should_parse_the_wire_format() {
        let filter: Filter = serde_json::from_value(json!({
            "op": "and",
            "filters": [
                {"op": "contains", "field": "title", "value": "dune"},
                {"op": "range", "field": "pages", "min": 300}
            ]
        }))
        .unwrap();
        assert_eq!(
            filter,
            Filter::And {
                filters: vec![
                    Filter::contains("title", "dune"),
                    Filter::range("pages", Some(300), None::<i64>),
                ]
            }
        );
    }

    #[rstest]
    fn it_should_reject_unknown_fields() {
        let result = Filter::eq("isbn", "x").compile::<Book>();
        assert!(matches!(
            result,
            Err(QueryError::UnknownField { kind: "Book", ref field }) if field == "isbn"
        ));
        assert!(SortOrder::<Book>::compile(&[SortKey::asc("isbn")]).is_err());
    }

    #[rstest]
    fn it_should_reject_mistyped_values() {
        let result = Filter::eq("pages", "many").compile::<Book>();
        assert!(matches!(result, Err(QueryError::TypeMismatch { expected: FieldKind::Integer, .. })));
        let result = Filter::contains("pages", "4").compile::<Book>();
        assert!(matches!(result, Err(QueryError::NotSearchable { .. })));
    }

    #[rstest]
    fn it_should_sort_by_keys_then_identifier(shelf: Vec<Book>) {
        let mut books = shelf.clone();
        books.push(book(5, "Dune", 100, None));
        let order = SortOrder::<Book>::compile(&[SortKey::asc("title")]).unwrap();
        books.sort_by(|l, r| order.compare(l, r));
        let ids: Vec<_> = books.iter().filter_map(|b| b.id.map(EntityId::value)).collect();
        assert_eq!(ids, vec![1, 5, 3, 2, 4]);

        let order = SortOrder::<Book>::compile(&[SortKey::desc("pages")]).unwrap();
        books.sort_by(|l, r| order.compare(l, r));
        let ids: Vec<_> = books.iter().filter_map(|b| b.id.map(EntityId::value)).collect();
        assert_eq!(ids, vec![3, 1, 2, 4, 5]);
    }
}
