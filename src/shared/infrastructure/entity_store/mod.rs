// EntityStore port: durable, version-stamped storage for one entity kind.
//
// Responsibilities
// - find_by_id / find_page / count never mutate.
// - save assigns identity on first persistence and otherwise performs an atomic
//   compare-and-increment of the version stamp.
// - delete_by_id is a no-op for an absent identifier.
//
// Boundaries
// - Raw conditions only (not found, conflict, invalid query). Translation for callers
//   happens at the access endpoint.

pub mod in_memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::shared::core::entity::Entity;
use crate::shared::core::primitives::{EntityId, VersionStamp};
use crate::shared::core::query::{Filter, PageRequest, PageResult, QueryError};
use crate::shared::core::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum EntityStoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: EntityId },

    #[error("version mismatch on {kind} {id}: expected {expected}, actual {actual}")]
    ConcurrencyConflict {
        kind: &'static str,
        id: EntityId,
        expected: VersionStamp,
        actual: VersionStamp,
    },

    #[error(transparent)]
    InvalidQuery(#[from] QueryError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<E>, EntityStoreError>;

    async fn find_page(
        &self,
        page: &PageRequest,
        filter: Option<&Filter>,
    ) -> Result<PageResult<E>, EntityStoreError>;

    async fn save(&self, entity: E) -> Result<E, EntityStoreError>;

    async fn delete_by_id(&self, id: EntityId) -> Result<(), EntityStoreError>;

    async fn count(&self, filter: Option<&Filter>) -> Result<u64, EntityStoreError>;
}
