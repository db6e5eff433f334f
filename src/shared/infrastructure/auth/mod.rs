// Authorization ports consumed by the access endpoints.
//
// Purpose
// - PrincipalResolver: turn request credentials into the current principal (the
//   authentication subsystem lives behind this trait).
// - AuthorizationOracle: answer whether a principal satisfies a required access level.
//
// Responsibilities
// - `authorize` is the single gate every endpoint calls before doing any work.

pub mod in_memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(UnknownRole(s.trim().to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub roles: Vec<Role>,
}

impl Principal {
    pub fn new(username: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            username: username.into(),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn has(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Access level an endpoint demands from its callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Anonymous,
    Authenticated,
    Role(Role),
}

pub trait AuthorizationOracle: Send + Sync {
    fn has_role(&self, principal: Option<&Principal>, required: AccessLevel) -> bool;
}

/// Grants by the roles a principal carries. Administrators are not implicitly users.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoleOracle;

impl AuthorizationOracle for RoleOracle {
    fn has_role(&self, principal: Option<&Principal>, required: AccessLevel) -> bool {
        match (required, principal) {
            (AccessLevel::Anonymous, _) => true,
            (AccessLevel::Authenticated, principal) => principal.is_some(),
            (AccessLevel::Role(role), Some(principal)) => principal.has(role),
            (AccessLevel::Role(_), None) => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("access denied")]
pub struct AccessDenied;

pub fn authorize(
    oracle: &dyn AuthorizationOracle,
    principal: Option<&Principal>,
    required: AccessLevel,
) -> Result<(), AccessDenied> {
    if oracle.has_role(principal, required) {
        Ok(())
    } else {
        tracing::info!(
            principal = principal.map(|p| p.username.as_str()),
            ?required,
            "access denied"
        );
        Err(AccessDenied)
    }
}

#[async_trait]
pub trait PrincipalResolver: Send + Sync {
    /// `credentials` is the raw bearer token, if the request carried one.
    async fn current_principal(&self, credentials: Option<&str>) -> Option<Principal>;
}
