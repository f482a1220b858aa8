//! In-memory backing store
//!
//! A map-backed [`EntityRepository`] for tests, demos and local development.
//! It counts the queries it receives and can simulate query latency and
//! query failures, which makes coalescing and fallback behavior observable.

use async_trait::async_trait;
use dashmap::DashMap;
use rtc_domain::error::{Error, Result};
use rtc_domain::repositories::{CacheableEntity, EntityRepository};
use rtc_domain::value_objects::EntityId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Map-backed repository for entities of type `E`
///
/// # Example
///
/// ```ignore
/// let users = InMemoryEntityRepository::new().with_latency(Duration::from_millis(50));
/// users.insert("u1", User { id: "u1".into(), name: "Ada".into() });
///
/// let user = cache.get_entity::<User, _>(Arc::new(users), "u1", None).await?;
/// ```
pub struct InMemoryEntityRepository<E> {
    entities: DashMap<EntityId, E>,
    latency: Duration,
    queries: AtomicU64,
    failure: Mutex<Option<String>>,
}

impl<E: CacheableEntity> InMemoryEntityRepository<E> {
    /// Create an empty repository that answers immediately
    pub fn new() -> Self {
        Self {
            entities: DashMap::new(),
            latency: Duration::ZERO,
            queries: AtomicU64::new(0),
            failure: Mutex::new(None),
        }
    }

    /// Delay every query by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Insert or replace an entity
    pub fn insert(&self, id: impl Into<EntityId>, entity: E) {
        self.entities.insert(id.into(), entity);
    }

    /// Remove an entity, returning it if present
    pub fn remove(&self, id: impl Into<EntityId>) -> Option<E> {
        self.entities.remove(&id.into()).map(|(_, entity)| entity)
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if no entities are stored
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of `find_by_id` calls received so far
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }

    /// Make every following query fail with `message`
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }

    /// Stop failing queries
    pub fn recover(&self) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn current_failure(&self) -> Option<String> {
        self.failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<E: CacheableEntity> Default for InMemoryEntityRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: CacheableEntity> EntityRepository<E> for InMemoryEntityRepository<E> {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<E>> {
        let query = self.queries.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(collection = E::collection(), %id, query, "Querying in-memory store");

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if let Some(message) = self.current_failure() {
            return Err(Error::backing_store(message));
        }

        Ok(self.entities.get(id).map(|entry| entry.value().clone()))
    }
}

impl<E> std::fmt::Debug for InMemoryEntityRepository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryEntityRepository")
            .field("entities", &self.entities.len())
            .field("latency", &self.latency)
            .field("queries", &self.queries.load(Ordering::SeqCst))
            .finish()
    }
}
