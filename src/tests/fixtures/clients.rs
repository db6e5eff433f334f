// Shared test fixture for the Client entity.
// Starts from the canonical client in json/client.json; setters override single fields.

use std::fs;

use crate::modules::clients::core::client::Client;
use crate::shared::core::primitives::EntityId;

pub struct ClientBuilder {
    inner: Client,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl ClientBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string("./src/tests/fixtures/json/client.json").unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn id(mut self, v: u64) -> Self {
        self.inner.id = Some(EntityId::new(v));
        self
    }

    pub fn version(mut self, v: u64) -> Self {
        self.inner.version = v;
        self
    }

    pub fn first_name(mut self, v: impl Into<String>) -> Self {
        self.inner.first_name = v.into();
        self
    }

    pub fn last_name(mut self, v: impl Into<String>) -> Self {
        self.inner.last_name = v.into();
        self
    }

    pub fn occupation(mut self, v: impl Into<String>) -> Self {
        self.inner.occupation = v.into();
        self
    }

    pub fn email(mut self, v: impl Into<String>) -> Self {
        self.inner.email = v.into();
        self
    }

    pub fn build(self) -> Client {
        self.inner
    }
}

#[cfg(test)]
mod client_builder_tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = ClientBuilder::default().build();
        assert_eq!(built.id, None);
        assert_eq!(built.version, 0);
        assert_eq!(built.first_name, "Amina");
        assert_eq!(built.last_name, "Qureshi");
        assert_eq!(built.date_of_birth, NaiveDate::from_ymd_opt(1988, 4, 17));
    }

    #[rstest]
    fn setters_override_fields() {
        let built = ClientBuilder::new()
            .id(4)
            .version(2)
            .first_name("Bilal")
            .last_name("Khan")
            .occupation("Pilot")
            .email("")
            .build();
        assert_eq!(built.id, Some(EntityId::new(4)));
        assert_eq!(built.version, 2);
        assert_eq!(built.first_name, "Bilal");
        assert_eq!(built.last_name, "Khan");
        assert_eq!(built.occupation, "Pilot");
        assert_eq!(built.email, "");
    }
}
