// Entity contract every persisted kind implements.
//
// Responsibilities
// - Expose identity and version stamp so stores can enforce optimistic concurrency.
// - Point at the kind's field registry and default ordering.
// - Declare field constraints through `validate`.

use serde_json::{Map, Value};

use crate::shared::core::fields::{FieldKind, FieldRegistry, FieldValue, Getter};
use crate::shared::core::primitives::{EntityId, VersionStamp};
use crate::shared::core::query::{QueryError, SortKey};
use crate::shared::core::validation::ValidationErrors;

pub const ID_FIELD: &str = "id";
pub const VERSION_FIELD: &str = "version";

pub trait Entity: Clone + Default + Send + Sync + 'static {
    /// Human readable kind name used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> Option<EntityId>;
    fn version(&self) -> VersionStamp;
    fn set_identity(&mut self, id: Option<EntityId>, version: VersionStamp);

    fn fields() -> &'static FieldRegistry<Self>;

    fn default_sort() -> Vec<SortKey> {
        vec![SortKey::asc(ID_FIELD)]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

/// Read-only typed view of one field, including the `id` and `version` pseudo-fields.
pub struct Accessor<E> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub get: Getter<E>,
}

pub fn accessor<E: Entity>(name: &str) -> Result<Accessor<E>, QueryError> {
    match name {
        ID_FIELD => Ok(Accessor {
            name: ID_FIELD,
            kind: FieldKind::Integer,
            get: |e: &E| {
                e.id()
                    .map_or(FieldValue::Null, |id| FieldValue::Integer(id.value() as i64))
            },
        }),
        VERSION_FIELD => Ok(Accessor {
            name: VERSION_FIELD,
            kind: FieldKind::Integer,
            get: |e: &E| FieldValue::Integer(e.version() as i64),
        }),
        _ => E::fields()
            .get(name)
            .map(|field| Accessor {
                name: field.name,
                kind: field.kind,
                get: field.get,
            })
            .ok_or_else(|| QueryError::UnknownField {
                kind: E::KIND,
                field: name.to_owned(),
            }),
    }
}

/// Builds a detached entity from a JSON object, the way a form binder would.
///
/// `id` may be absent or null (new entity); `version` defaults to 0.
pub fn bind_entity<E: Entity>(values: &Map<String, Value>) -> Result<E, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let id = match values.get(ID_FIELD) {
        None | Some(Value::Null) => None,
        Some(raw) => match raw.as_u64() {
            Some(id) => Some(EntityId::new(id)),
            None => {
                errors.push(ID_FIELD, "must be a positive integer");
                None
            }
        },
    };
    let version = match values.get(VERSION_FIELD) {
        None | Some(Value::Null) => 0,
        Some(raw) => raw.as_u64().unwrap_or_else(|| {
            errors.push(VERSION_FIELD, "must be a non-negative integer");
            0
        }),
    };

    let mut entity = E::default();
    entity.set_identity(id, version);
    if let Err(field_errors) = E::fields().bind(&mut entity, values, &[ID_FIELD, VERSION_FIELD]) {
        for violation in field_errors.violations() {
            errors.push(violation.field.as_str(), violation.message.as_str());
        }
    }
    errors.into_result().map(|()| entity)
}
