// Access endpoint: the externally callable surface of one entity kind.
//
// Responsibilities
// - Check the kind's required access level before every call; a denied caller never reaches the service.
// - Translate a store-level concurrency conflict into an EditConflict with a fixed, user facing message.
// - Pass not found, invalid query and validation failures through; hide backend detail.
//
// Boundaries
// - No caching, batching or retries. A conflicting update is reported, never replayed.

use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

use crate::modules::entities::use_cases::service::EntityService;
use crate::shared::core::entity::{Entity, bind_entity};
use crate::shared::core::primitives::EntityId;
use crate::shared::core::query::{Filter, PageRequest, PageResult, QueryError};
use crate::shared::core::validation::ValidationErrors;
use crate::shared::infrastructure::auth::{
    AccessDenied, AccessLevel, AuthorizationOracle, Principal, authorize,
};
use crate::shared::infrastructure::entity_store::{EntityStore, EntityStoreError};

pub const EDIT_CONFLICT_MESSAGE: &str =
    "Somebody else has updated the data while you were making changes.";

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("access denied")]
    Unauthorized,

    #[error("{message}")]
    EditConflict { message: String },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: EntityId },

    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    #[error(transparent)]
    ValidationFailed(#[from] ValidationErrors),

    #[error("the data store is currently unavailable")]
    Unavailable,
}

impl EndpointError {
    pub fn edit_conflict() -> Self {
        EndpointError::EditConflict {
            message: EDIT_CONFLICT_MESSAGE.to_string(),
        }
    }

    /// Stable, machine readable code shared by the HTTP and GraphQL adapters.
    pub fn code(&self) -> &'static str {
        match self {
            EndpointError::Unauthorized => "UNAUTHORIZED",
            EndpointError::EditConflict { .. } => "EDIT_CONFLICT",
            EndpointError::NotFound { .. } => "NOT_FOUND",
            EndpointError::InvalidQuery(_) => "INVALID_QUERY",
            EndpointError::ValidationFailed(_) => "VALIDATION_FAILED",
            EndpointError::Unavailable => "UNAVAILABLE",
        }
    }
}

impl From<AccessDenied> for EndpointError {
    fn from(_: AccessDenied) -> Self {
        EndpointError::Unauthorized
    }
}

impl From<EntityStoreError> for EndpointError {
    fn from(err: EntityStoreError) -> Self {
        match err {
            EntityStoreError::NotFound { kind, id } => EndpointError::NotFound { kind, id },
            EntityStoreError::ConcurrencyConflict { .. } => EndpointError::edit_conflict(),
            EntityStoreError::InvalidQuery(err) => EndpointError::InvalidQuery(err),
            EntityStoreError::Validation(err) => EndpointError::ValidationFailed(err),
            EntityStoreError::Backend(detail) => {
                tracing::error!(%detail, "entity store failure");
                EndpointError::Unavailable
            }
        }
    }
}

pub struct AccessEndpoint<E, TStore>
where
    E: Entity,
    TStore: EntityStore<E> + 'static,
{
    service: Arc<EntityService<E, TStore>>,
    required_level: AccessLevel,
    oracle: Arc<dyn AuthorizationOracle>,
}

impl<E, TStore> AccessEndpoint<E, TStore>
where
    E: Entity,
    TStore: EntityStore<E> + 'static,
{
    pub fn new(
        service: Arc<EntityService<E, TStore>>,
        required_level: AccessLevel,
        oracle: Arc<dyn AuthorizationOracle>,
    ) -> Self {
        Self {
            service,
            required_level,
            oracle,
        }
    }

    pub fn service(&self) -> &Arc<EntityService<E, TStore>> {
        &self.service
    }

    pub fn required_level(&self) -> AccessLevel {
        self.required_level
    }

    fn authorize(&self, principal: Option<&Principal>) -> Result<(), EndpointError> {
        authorize(self.oracle.as_ref(), principal, self.required_level)?;
        Ok(())
    }

    pub async fn list(
        &self,
        principal: Option<&Principal>,
        page: PageRequest,
        filter: Option<&Filter>,
    ) -> Result<PageResult<E>, EndpointError> {
        self.authorize(principal)?;
        Ok(self.service.list(page, filter).await?)
    }

    pub async fn get(
        &self,
        principal: Option<&Principal>,
        id: EntityId,
    ) -> Result<Option<E>, EndpointError> {
        self.authorize(principal)?;
        Ok(self.service.get(id).await?)
    }

    pub async fn update(
        &self,
        principal: Option<&Principal>,
        entity: E,
    ) -> Result<E, EndpointError> {
        self.authorize(principal)?;
        self.apply_update(entity).await
    }

    /// Like `update`, for callers holding loosely typed form values instead of an entity.
    pub async fn update_fields(
        &self,
        principal: Option<&Principal>,
        fields: &Map<String, Value>,
    ) -> Result<E, EndpointError> {
        self.authorize(principal)?;
        let entity = bind_entity::<E>(fields)?;
        self.apply_update(entity).await
    }

    async fn apply_update(&self, entity: E) -> Result<E, EndpointError> {
        self.service.update(entity).await.map_err(|err| {
            if let EntityStoreError::ConcurrencyConflict {
                kind,
                id,
                expected,
                actual,
            } = &err
            {
                tracing::warn!(kind, %id, expected, actual, "rejected stale update");
            }
            EndpointError::from(err)
        })
    }

    pub async fn delete(
        &self,
        principal: Option<&Principal>,
        id: EntityId,
    ) -> Result<(), EndpointError> {
        self.authorize(principal)?;
        tracing::debug!(kind = E::KIND, %id, "delete");
        Ok(self.service.delete(id).await?)
    }

    pub async fn count(
        &self,
        principal: Option<&Principal>,
        filter: Option<&Filter>,
    ) -> Result<u64, EndpointError> {
        self.authorize(principal)?;
        Ok(self.service.count(filter).await?)
    }
}
