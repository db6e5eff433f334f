// In memory implementation of the EntityStore port.
//
// Purpose
// - Back the service during local development and in tests without a database.
//
// Responsibilities
// - Keep rows in identifier order and hand out identifiers from a sequence that never goes back.
// - Hold the write lock across the stamp comparison and the write so save is atomic.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::shared::core::entity::Entity;
use crate::shared::core::primitives::EntityId;
use crate::shared::core::query::{Filter, PageRequest, PageResult, SortOrder, compile_filter};
use crate::shared::infrastructure::entity_store::{EntityStore, EntityStoreError};

pub struct InMemoryEntityStore<E: Entity> {
    rows: RwLock<BTreeMap<EntityId, E>>,
    sequence: AtomicU64,
    is_offline: bool,
    delay_save_ms: AtomicU64,
}

impl<E: Entity> Default for InMemoryEntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> InMemoryEntityStore<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            sequence: AtomicU64::new(0),
            is_offline: false,
            delay_save_ms: AtomicU64::new(0),
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Delays every save before it takes the write lock.
    pub fn set_delay_save_ms(&self, ms: u64) {
        self.delay_save_ms.store(ms, Ordering::Relaxed);
    }

    fn ensure_online(&self) -> Result<(), EntityStoreError> {
        if self.is_offline {
            return Err(EntityStoreError::Backend("Entity store offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for InMemoryEntityStore<E> {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<E>, EntityStoreError> {
        self.ensure_online()?;
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_page(
        &self,
        page: &PageRequest,
        filter: Option<&Filter>,
    ) -> Result<PageResult<E>, EntityStoreError> {
        self.ensure_online()?;
        let predicate = compile_filter::<E>(filter)?;
        let order = SortOrder::<E>::compile(&page.sort)?;

        let guard = self.rows.read().await;
        let mut matching: Vec<&E> = guard
            .values()
            .filter(|row| predicate.as_ref().is_none_or(|p| p.matches(row)))
            .collect();
        matching.sort_by(|left, right| order.compare(left, right));

        let total_count = matching.len() as u64;
        let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
        let size = usize::try_from(page.size).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(size)
            .cloned()
            .collect();
        Ok(PageResult { items, total_count })
    }

    async fn save(&self, mut entity: E) -> Result<E, EntityStoreError> {
        self.ensure_online()?;
        entity.validate()?;

        let delay = self.delay_save_ms.load(Ordering::Relaxed);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let mut rows = self.rows.write().await;
        match entity.id() {
            None => {
                let id = EntityId::new(self.sequence.fetch_add(1, Ordering::SeqCst) + 1);
                entity.set_identity(Some(id), 0);
                rows.insert(id, entity.clone());
                Ok(entity)
            }
            Some(id) => {
                let actual = rows
                    .get(&id)
                    .map(Entity::version)
                    .ok_or(EntityStoreError::NotFound { kind: E::KIND, id })?;
                if actual != entity.version() {
                    return Err(EntityStoreError::ConcurrencyConflict {
                        kind: E::KIND,
                        id,
                        expected: entity.version(),
                        actual,
                    });
                }
                entity.set_identity(Some(id), actual + 1);
                rows.insert(id, entity.clone());
                Ok(entity)
            }
        }
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<(), EntityStoreError> {
        self.ensure_online()?;
        self.rows.write().await.remove(&id);
        Ok(())
    }

    async fn count(&self, filter: Option<&Filter>) -> Result<u64, EntityStoreError> {
        self.ensure_online()?;
        let predicate = compile_filter::<E>(filter)?;
        let guard = self.rows.read().await;
        let count = match predicate {
            Some(predicate) => guard.values().filter(|row| predicate.matches(row)).count(),
            None => guard.len(),
        };
        Ok(count as u64)
    }
}
