// Principals shared by endpoint, HTTP and GraphQL tests.

use crate::shared::infrastructure::auth::in_memory::InMemoryPrincipalResolver;
use crate::shared::infrastructure::auth::{Principal, Role};

pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "user-token";

pub fn admin() -> Principal {
    Principal::new("admin", [Role::User, Role::Admin])
}

pub fn user() -> Principal {
    Principal::new("user", [Role::User])
}

pub fn resolver() -> InMemoryPrincipalResolver {
    InMemoryPrincipalResolver::new()
        .with_token(ADMIN_TOKEN, admin())
        .with_token(USER_TOKEN, user())
}
