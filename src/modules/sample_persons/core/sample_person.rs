// SamplePerson: demonstration records any signed-in user may browse and edit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::shared::core::entity::Entity;
use crate::shared::core::fields::{FieldDescriptor, FieldKind, FieldRegistry, FieldValue, text_field};
use crate::shared::core::primitives::{EntityId, VersionStamp};
use crate::shared::core::query::SortKey;
use crate::shared::core::validation::ValidationErrors;
use crate::shared::infrastructure::auth::AccessLevel;

pub const SAMPLE_PERSON_ACCESS: AccessLevel = AccessLevel::Authenticated;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplePerson {
    pub id: Option<EntityId>,
    pub version: VersionStamp,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub occupation: String,
    pub role: String,
    pub important: bool,
}

static SAMPLE_PERSON_FIELDS: LazyLock<FieldRegistry<SamplePerson>> = LazyLock::new(|| {
    FieldRegistry::new(vec![
        text_field!(SamplePerson, first_name),
        text_field!(SamplePerson, last_name),
        text_field!(SamplePerson, email),
        text_field!(SamplePerson, phone),
        FieldDescriptor::new(
            "date_of_birth",
            FieldKind::Date,
            |p: &SamplePerson| FieldValue::optional_date(p.date_of_birth),
            |p: &mut SamplePerson, v: FieldValue| {
                p.date_of_birth = v.into_optional_date();
                Ok(())
            },
        ),
        text_field!(SamplePerson, occupation),
        text_field!(SamplePerson, role),
        FieldDescriptor::new(
            "important",
            FieldKind::Boolean,
            |p: &SamplePerson| FieldValue::Bool(p.important),
            |p: &mut SamplePerson, v: FieldValue| {
                p.important = v.into_bool();
                Ok(())
            },
        ),
    ])
});

impl Entity for SamplePerson {
    const KIND: &'static str = "SamplePerson";

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
        &SAMPLE_PERSON_FIELDS
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
