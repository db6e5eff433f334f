// In memory implementation of the PrincipalResolver port.
//
// Purpose
// - Map static API tokens (from configuration) to principals for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::shared::infrastructure::auth::{Principal, PrincipalResolver};

#[derive(Debug, Default)]
pub struct InMemoryPrincipalResolver {
    tokens: HashMap<String, Principal>,
}

impl InMemoryPrincipalResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, principal: Principal) -> Self {
        self.tokens.insert(token.into(), principal);
        self
    }
}

impl FromIterator<(String, Principal)> for InMemoryPrincipalResolver {
    fn from_iter<T: IntoIterator<Item = (String, Principal)>>(iter: T) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl PrincipalResolver for InMemoryPrincipalResolver {
    async fn current_principal(&self, credentials: Option<&str>) -> Option<Principal> {
        credentials.and_then(|token| self.tokens.get(token).cloned())
    }
}

#[cfg(test)]
mod in_memory_principal_resolver_tests {
    use super::*;
    use crate::shared::infrastructure::auth::Role;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_resolve_known_tokens_only() {
        let resolver = InMemoryPrincipalResolver::new()
            .with_token("secret", Principal::new("admin", [Role::Admin]));

        let principal = resolver.current_principal(Some("secret")).await;
        assert_eq!(principal.map(|p| p.username), Some("admin".to_string()));
        assert_eq!(resolver.current_principal(Some("guess")).await, None);
        assert_eq!(resolver.current_principal(None).await, None);
    }
}
