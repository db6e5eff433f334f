// Authenticated user lookup.
//
// Purpose
// - Answer "who am I" for the browser client: the User row whose username matches the
//   current principal.
//
// Boundaries
// - Open to anonymous callers; an anonymous caller simply gets nothing back.

use std::sync::Arc;

use crate::modules::entities::use_cases::endpoint::EndpointError;
use crate::modules::entities::use_cases::service::EntityService;
use crate::modules::users::core::user::User;
use crate::shared::core::query::{Filter, PageRequest};
use crate::shared::infrastructure::auth::Principal;
use crate::shared::infrastructure::entity_store::EntityStore;

pub struct AuthenticatedUserQuery<TStore>
where
    TStore: EntityStore<User> + 'static,
{
    users: Arc<EntityService<User, TStore>>,
}

impl<TStore> AuthenticatedUserQuery<TStore>
where
    TStore: EntityStore<User> + 'static,
{
    pub fn new(users: Arc<EntityService<User, TStore>>) -> Self {
        Self { users }
    }

    pub async fn get(&self, principal: Option<&Principal>) -> Result<Option<User>, EndpointError> {
        let Some(principal) = principal else {
            return Ok(None);
        };
        let filter = Filter::eq("username", principal.username.as_str());
        let page = self.users.list(PageRequest::new(0, 1), Some(&filter)).await?;
        Ok(page.items.into_iter().next())
    }
}
