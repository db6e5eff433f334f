// Generic entity service layered over one EntityStore.
//
// Responsibilities
// - Delegate list / get / update / delete / count to the store.
// - Apply the kind's default ordering when a page request carries none.
// - Bound the page window before it reaches the store.
// - Forward every store failure unchanged. A stale stamp stays a ConcurrencyConflict here;
//   the caller's stamp is authoritative and the entity is never re-read before saving.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::shared::core::entity::Entity;
use crate::shared::core::primitives::EntityId;
use crate::shared::core::query::{Filter, PageRequest, PageResult, QueryError, SortKey};
use crate::shared::infrastructure::entity_store::{EntityStore, EntityStoreError};

pub const DEFAULT_MAX_PAGE_SIZE: u64 = 500;

pub struct EntityService<E, TStore>
where
    E: Entity,
    TStore: EntityStore<E> + 'static,
{
    store: Arc<TStore>,
    default_sort: Vec<SortKey>,
    max_page_size: u64,
    _entity: PhantomData<fn() -> E>,
}

impl<E, TStore> EntityService<E, TStore>
where
    E: Entity,
    TStore: EntityStore<E> + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self {
            store,
            default_sort: E::default_sort(),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            _entity: PhantomData,
        }
    }

    pub fn with_max_page_size(mut self, max_page_size: u64) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    pub async fn list(
        &self,
        mut page: PageRequest,
        filter: Option<&Filter>,
    ) -> Result<PageResult<E>, EntityStoreError> {
        if page.size == 0 {
            return Err(QueryError::EmptyPage.into());
        }
        if page.size > self.max_page_size {
            return Err(QueryError::PageTooLarge {
                requested: page.size,
                max: self.max_page_size,
            }
            .into());
        }
        if page.sort.is_empty() {
            page.sort = self.default_sort.clone();
        }
        self.store.find_page(&page, filter).await
    }

    pub async fn get(&self, id: EntityId) -> Result<Option<E>, EntityStoreError> {
        self.store.find_by_id(id).await
    }

    pub async fn update(&self, entity: E) -> Result<E, EntityStoreError> {
        self.store.save(entity).await
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), EntityStoreError> {
        self.store.delete_by_id(id).await
    }

    pub async fn count(&self, filter: Option<&Filter>) -> Result<u64, EntityStoreError> {
        self.store.count(filter).await
    }
}
