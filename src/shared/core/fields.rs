// Field registry: the explicit name -> (kind, getter, setter) table of an entity kind.
//
// Purpose
// - Bind loosely typed input (JSON objects from a form) onto a typed entity.
// - Give filters and sort keys a typed view of a field by name.
//
// Boundaries
// - No reflection. Every entity kind builds its table once and hands out a &'static reference.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::fmt;

use crate::shared::core::validation::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
    Date,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Text => "text",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date (YYYY-MM-DD)",
        };
        f.write_str(name)
    }
}

impl FieldKind {
    /// Coerces a JSON value into this kind. `null` is accepted by every kind.
    pub fn coerce(self, value: &Value) -> Option<FieldValue> {
        match (self, value) {
            (_, Value::Null) => Some(FieldValue::Null),
            (FieldKind::Text, Value::String(s)) => Some(FieldValue::Text(s.clone())),
            (FieldKind::Integer, Value::Number(n)) => n.as_i64().map(FieldValue::Integer),
            (FieldKind::Boolean, Value::Bool(b)) => Some(FieldValue::Bool(*b)),
            (FieldKind::Date, Value::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(FieldValue::Date),
            _ => None,
        }
    }
}

/// Typed field value. `Null` orders before everything else.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn text(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }

    pub fn optional_text(value: Option<&str>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::text)
    }

    pub fn optional_date(value: Option<NaiveDate>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Date)
    }

    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            _ => String::new(),
        }
    }

    pub fn into_optional_text(self) -> Option<String> {
        match self {
            FieldValue::Text(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    pub fn into_optional_date(self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn into_bool(self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }
}

pub type Getter<E> = fn(&E) -> FieldValue;
pub type Setter<E> = fn(&mut E, FieldValue) -> Result<(), String>;

pub struct FieldDescriptor<E> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub get: Getter<E>,
    pub set: Setter<E>,
}

impl<E> FieldDescriptor<E> {
    pub fn new(name: &'static str, kind: FieldKind, get: Getter<E>, set: Setter<E>) -> Self {
        Self {
            name,
            kind,
            get,
            set,
        }
    }
}

pub struct FieldRegistry<E> {
    fields: Vec<FieldDescriptor<E>>,
}

impl<E> FieldRegistry<E> {
    pub fn new(fields: Vec<FieldDescriptor<E>>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor<E>> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Applies every entry of `values` through the matching setter.
    ///
    /// Keys listed in `reserved` are skipped (the caller handles them). Unknown keys,
    /// values of the wrong kind and setter rejections are all reported together.
    pub fn bind(
        &self,
        target: &mut E,
        values: &Map<String, Value>,
        reserved: &[&str],
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (name, raw) in values {
            if reserved.contains(&name.as_str()) {
                continue;
            }
            let Some(field) = self.get(name) else {
                errors.push(name.as_str(), "is not a known field");
                continue;
            };
            let Some(value) = field.kind.coerce(raw) else {
                errors.push(name.as_str(), format!("must be {}", field.kind));
                continue;
            };
            if let Err(message) = (field.set)(target, value) {
                errors.push(name.as_str(), message);
            }
        }
        errors.into_result()
    }
}

/// Descriptor for a plain `String` field, where blank stands for "not set".
macro_rules! text_field {
    ($entity:ty, $field:ident) => {
        $crate::shared::core::fields::FieldDescriptor::new(
            stringify!($field),
            $crate::shared::core::fields::FieldKind::Text,
            |e: &$entity| $crate::shared::core::fields::FieldValue::text(&e.$field),
            |e: &mut $entity, v: $crate::shared::core::fields::FieldValue| {
                e.$field = v.into_text();
                Ok(())
            },
        )
    };
}

pub(crate) use text_field;
