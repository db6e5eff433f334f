// Shared test fixture for the User entity, seeded from json/user.json.

use std::fs;

use crate::modules::users::core::user::User;

pub struct UserBuilder {
    inner: User,
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl UserBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string("./src/tests/fixtures/json/user.json").unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn username(mut self, v: impl Into<String>) -> Self {
        self.inner.username = v.into();
        self
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.inner.name = v.into();
        self
    }

    pub fn roles(mut self, v: impl Into<String>) -> Self {
        self.inner.roles = v.into();
        self
    }

    pub fn build(self) -> User {
        self.inner
    }
}
