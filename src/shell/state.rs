use std::sync::Arc;

use crate::modules::clients::core::client::{CLIENT_ACCESS, Client};
use crate::modules::entities::inbound::http::HasPrincipals;
use crate::modules::entities::use_cases::endpoint::AccessEndpoint;
use crate::modules::entities::use_cases::service::EntityService;
use crate::modules::sample_persons::core::sample_person::{SAMPLE_PERSON_ACCESS, SamplePerson};
use crate::modules::users::core::user::{USER_ACCESS, User};
use crate::modules::users::use_cases::authenticated_user::AuthenticatedUserQuery;
use crate::shared::core::entity::Entity;
use crate::shared::infrastructure::auth::in_memory::InMemoryPrincipalResolver;
use crate::shared::infrastructure::auth::{AccessLevel, AuthorizationOracle, PrincipalResolver, RoleOracle};
use crate::shared::infrastructure::entity_store::in_memory::InMemoryEntityStore;
use crate::shell::config::AppConfig;

pub type ClientEndpoint = AccessEndpoint<Client, InMemoryEntityStore<Client>>;
pub type SamplePersonEndpoint = AccessEndpoint<SamplePerson, InMemoryEntityStore<SamplePerson>>;
pub type UserEndpoint = AccessEndpoint<User, InMemoryEntityStore<User>>;

#[derive(Clone)]
pub struct AppState {
    pub clients: Arc<ClientEndpoint>,
    pub sample_persons: Arc<SamplePersonEndpoint>,
    pub users: Arc<UserEndpoint>,
    pub authenticated_user: Arc<AuthenticatedUserQuery<InMemoryEntityStore<User>>>,
    pub principals: Arc<dyn PrincipalResolver>,
}

impl AppState {
    pub fn in_memory(config: &AppConfig) -> Self {
        let principals: InMemoryPrincipalResolver = config.api_tokens.iter().cloned().collect();
        Self::in_memory_with(config.max_page_size, Arc::new(principals))
    }

    pub fn in_memory_with(max_page_size: u64, principals: Arc<dyn PrincipalResolver>) -> Self {
        let oracle: Arc<dyn AuthorizationOracle> = Arc::new(RoleOracle);

        let users = in_memory_service::<User>(max_page_size);
        let authenticated_user = Arc::new(AuthenticatedUserQuery::new(users.clone()));

        Self {
            clients: endpoint(
                in_memory_service::<Client>(max_page_size),
                CLIENT_ACCESS,
                &oracle,
            ),
            sample_persons: endpoint(
                in_memory_service::<SamplePerson>(max_page_size),
                SAMPLE_PERSON_ACCESS,
                &oracle,
            ),
            users: endpoint(users, USER_ACCESS, &oracle),
            authenticated_user,
            principals,
        }
    }
}

impl HasPrincipals for AppState {
    fn principals(&self) -> &Arc<dyn PrincipalResolver> {
        &self.principals
    }
}

fn in_memory_service<E: Entity>(
    max_page_size: u64,
) -> Arc<EntityService<E, InMemoryEntityStore<E>>> {
    Arc::new(EntityService::new(Arc::new(InMemoryEntityStore::new())).with_max_page_size(max_page_size))
}

fn endpoint<E: Entity>(
    service: Arc<EntityService<E, InMemoryEntityStore<E>>>,
    required_level: AccessLevel,
    oracle: &Arc<dyn AuthorizationOracle>,
) -> Arc<AccessEndpoint<E, InMemoryEntityStore<E>>> {
    Arc::new(AccessEndpoint::new(service, required_level, oracle.clone()))
}
