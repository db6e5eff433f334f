// Client: a person the back office keeps contact and identity details for.
//
// Responsibilities
// - Field table used for form binding, filtering and sorting.
// - Constraints: first and last name required, email well-formed when given.
// - Administrators only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::shared::core::entity::Entity;
use crate::shared::core::fields::{FieldDescriptor, FieldKind, FieldRegistry, FieldValue, text_field};
use crate::shared::core::primitives::{EntityId, VersionStamp};
use crate::shared::core::query::SortKey;
use crate::shared::core::validation::ValidationErrors;
use crate::shared::infrastructure::auth::{AccessLevel, Role};

pub const CLIENT_ACCESS: AccessLevel = AccessLevel::Role(Role::Admin);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    pub id: Option<EntityId>,
    pub version: VersionStamp,
    pub first_name: String,
    pub last_name: String,
    pub father_name: String,
    pub nic: String,
    pub cast: String,
    pub occupation: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: String,
}

static CLIENT_FIELDS: LazyLock<FieldRegistry<Client>> = LazyLock::new(|| {
    FieldRegistry::new(vec![
        text_field!(Client, first_name),
        text_field!(Client, last_name),
        text_field!(Client, father_name),
        text_field!(Client, nic),
        text_field!(Client, cast),
        text_field!(Client, occupation),
        text_field!(Client, email),
        text_field!(Client, phone),
        FieldDescriptor::new(
            "date_of_birth",
            FieldKind::Date,
            |c: &Client| FieldValue::optional_date(c.date_of_birth),
            |c: &mut Client, v: FieldValue| {
                c.date_of_birth = v.into_optional_date();
                Ok(())
            },
        ),
        text_field!(Client, address),
    ])
});

impl Entity for Client {
    const KIND: &'static str = "Client";

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
        &CLIENT_FIELDS
    }

    fn default_sort() -> Vec<SortKey> {
        vec![SortKey::asc("last_name"), SortKey::asc("first_name")]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_not_blank("first_name", &self.first_name);
        errors.require_not_blank("last_name", &self.last_name);
        errors.require_email("email", &self.email);
        errors.into_result()
    }
}
