// User: an account known to the back office.
//
// `roles` is stored the way the account table keeps it, a comma separated list
// such as "USER,ADMIN". `role_set` parses it; `validate` rejects unknown names.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::shared::core::entity::Entity;
use crate::shared::core::fields::{FieldDescriptor, FieldKind, FieldRegistry, FieldValue, text_field};
use crate::shared::core::primitives::{EntityId, VersionStamp};
use crate::shared::core::query::SortKey;
use crate::shared::core::validation::ValidationErrors;
use crate::shared::infrastructure::auth::{AccessLevel, Principal, Role, UnknownRole};

pub const USER_ACCESS: AccessLevel = AccessLevel::Role(Role::Admin);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: Option<EntityId>,
    pub version: VersionStamp,
    pub username: String,
    pub name: String,
    pub roles: String,
    pub profile_picture_url: Option<String>,
}

impl User {
    pub fn role_set(&self) -> Result<Vec<Role>, UnknownRole> {
        self.roles
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect()
    }

    pub fn principal(&self) -> Result<Principal, UnknownRole> {
        Ok(Principal::new(self.username.clone(), self.role_set()?))
    }
}

static USER_FIELDS: LazyLock<FieldRegistry<User>> = LazyLock::new(|| {
    FieldRegistry::new(vec![
        text_field!(User, username),
        text_field!(User, name),
        text_field!(User, roles),
        FieldDescriptor::new(
            "profile_picture_url",
            FieldKind::Text,
            |u: &User| FieldValue::optional_text(u.profile_picture_url.as_deref()),
            |u: &mut User, v: FieldValue| {
                u.profile_picture_url = v.into_optional_text();
                Ok(())
            },
        ),
    ])
});

impl Entity for User {
    const KIND: &'static str = "User";

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
        &USER_FIELDS
    }

    fn default_sort() -> Vec<SortKey> {
        vec![SortKey::asc("username")]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_not_blank("username", &self.username);
        if let Err(err) = self.role_set() {
            errors.push("roles", err.to_string());
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod user_tests {
    use super::*;
    use crate::tests::fixtures::users::UserBuilder;
    use rstest::rstest;

    #[rstest]
    #[case("USER", vec![Role::User])]
    #[case("USER,ADMIN", vec![Role::User, Role::Admin])]
    #[case(" admin , user ", vec![Role::Admin, Role::User])]
    #[case("", vec![])]
    fn it_should_parse_the_role_list(#[case] roles: &str, #[case] expected: Vec<Role>) {
        let user = UserBuilder::new().roles(roles).build();
        assert_eq!(user.role_set(), Ok(expected));
    }

    #[rstest]
    fn it_should_reject_unknown_roles_and_blank_usernames() {
        let errors = UserBuilder::new()
            .username(" ")
            .roles("USER,ROOT")
            .build()
            .validate()
            .unwrap_err();
        let fields: Vec<_> = errors.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["username", "roles"]);
    }

    #[rstest]
    fn it_should_turn_into_a_principal() {
        let principal = UserBuilder::new()
            .username("admin")
            .roles("USER,ADMIN")
            .build()
            .principal()
            .unwrap();
        assert_eq!(principal.username, "admin");
        assert!(principal.has(Role::Admin));
    }
}
