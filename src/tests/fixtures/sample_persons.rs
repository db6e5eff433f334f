// Shared test fixture for the SamplePerson entity, seeded from json/sample_person.json.

use std::fs;

use crate::modules::sample_persons::core::sample_person::SamplePerson;

pub struct SamplePersonBuilder {
    inner: SamplePerson,
}

impl Default for SamplePersonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl SamplePersonBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string("./src/tests/fixtures/json/sample_person.json").unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
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

    pub fn important(mut self, v: bool) -> Self {
        self.inner.important = v;
        self
    }

    pub fn build(self) -> SamplePerson {
        self.inner
    }
}
