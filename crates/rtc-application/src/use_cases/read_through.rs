//! Read-through cache orchestration
//!
//! Cache-aside state machine for entity reads:
//!
//! ```text
//! START ─► CACHE_LOOKUP ─┬─ hit ──────────────────────────────► DONE
//!                        └─ miss / unavailable / malformed
//!                                   │
//!                                   ▼
//!                            BACKING_FETCH ─┬─ found ─► POPULATE_CACHE ─► DONE
//!                                           ├─ not found ───────────────► DONE (None)
//!                                           └─ error ───────────────────► FAILED
//! ```
//!
//! Both the cache lookup and the backing fetch go through the
//! [`RequestCoalescer`], so concurrent callers for one key share a single
//! operation. Cache population runs once per backing fetch as a tracked
//! background task; its failure is logged and never changes the result.

use crate::coalescer::{RequestCoalescer, RequestCoalescerStats};
use rtc_domain::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_KEY_PREFIX};
use rtc_domain::error::{Error, Result};
use rtc_domain::ports::providers::{CacheEntryConfig, CacheProvider};
use rtc_domain::repositories::{CacheableEntity, EntityRepository};
use rtc_domain::value_objects::{CacheKey, EntityId, EntityRef, KeyBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, warn};

/// Options resolved once when the cache is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOptions {
    /// TTL used when a caller does not supply one
    pub default_ttl: Duration,
    /// Prefix namespacing every key this cache builds
    pub key_prefix: String,
}

impl CacheOptions {
    /// Create options with the default TTL and no prefix
    pub fn new() -> Self {
        Self {
            default_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Set the default TTL
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Set the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of the cache lookup step
#[derive(Debug)]
enum CacheLookup {
    Hit(String),
    Miss,
    Unavailable(Arc<Error>),
}

/// Read-through cache in front of a primary datastore
///
/// Cheap to clone; clones share the provider, the coalescer and the
/// background write tracker.
///
/// # Example
///
/// ```ignore
/// let cache = ReadThroughCache::new(provider, CacheOptions::default());
///
/// // Free-form key/value
/// cache.set("foo", &json!({"a": 1}), Some(Duration::from_secs(5))).await?;
/// let foo: Option<serde_json::Value> = cache.get("foo").await;
///
/// // Entity read-through
/// let user: Option<User> = cache.get_entity(users.clone(), "u1", None).await?;
/// ```
#[derive(Clone)]
pub struct ReadThroughCache {
    provider: Arc<dyn CacheProvider>,
    coalescer: Arc<RequestCoalescer>,
    keys: KeyBuilder,
    default_ttl: Duration,
    pending_writes: TaskTracker,
}

impl ReadThroughCache {
    /// Create a read-through cache with its own coalescer
    pub fn new(provider: Arc<dyn CacheProvider>, options: CacheOptions) -> Self {
        Self::with_coalescer(provider, options, Arc::new(RequestCoalescer::new()))
    }

    /// Create a read-through cache sharing an existing coalescer
    pub fn with_coalescer(
        provider: Arc<dyn CacheProvider>,
        options: CacheOptions,
        coalescer: Arc<RequestCoalescer>,
    ) -> Self {
        let default_ttl = if options.default_ttl.is_zero() {
            Duration::from_secs(DEFAULT_CACHE_TTL_SECS)
        } else {
            options.default_ttl
        };
        debug!(
            provider = provider.provider_name(),
            prefix = %options.key_prefix,
            ttl = ?default_ttl,
            "Read-through cache configured"
        );

        Self {
            provider,
            coalescer,
            keys: KeyBuilder::new(options.key_prefix),
            default_ttl,
            pending_writes: TaskTracker::new(),
        }
    }

    /// The cache store adapter
    pub fn provider(&self) -> &Arc<dyn CacheProvider> {
        &self.provider
    }

    /// The key builder used for every operation
    pub fn key_builder(&self) -> &KeyBuilder {
        &self.keys
    }

    /// TTL applied when a caller does not supply one
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Coalescing statistics
    pub fn coalescer_stats(&self) -> RequestCoalescerStats {
        self.coalescer.stats()
    }

    /// Wait until every background cache write started so far has finished
    pub async fn flush_pending_writes(&self) {
        self.pending_writes.close();
        self.pending_writes.wait().await;
        self.pending_writes.reopen();
    }

    fn entry_config(&self, ttl: Option<Duration>) -> CacheEntryConfig {
        let ttl = match ttl {
            Some(ttl) if !ttl.is_zero() => ttl,
            _ => self.default_ttl,
        };
        CacheEntryConfig::new().with_ttl(ttl)
    }

    async fn lookup(&self, key: &CacheKey) -> CacheLookup {
        let provider = Arc::clone(&self.provider);
        let owned_key = key.clone();
        let fetch = self
            .coalescer
            .cache_reads()
            .coalesce(key.as_str(), move || async move {
                provider.get_json(owned_key.as_str()).await
            });

        match fetch.await {
            Ok(Some(payload)) => CacheLookup::Hit(payload),
            Ok(None) => CacheLookup::Miss,
            Err(err) => CacheLookup::Unavailable(err),
        }
    }
}

// Free-form key/value operations
impl ReadThroughCache {
    /// Get a value stored under a free-form key
    ///
    /// There is no backing store behind free-form keys: a miss, a cache
    /// failure and a malformed payload all read as `None`.
    pub async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let key = self.keys.raw_key(key);
        match self.lookup(&key).await {
            CacheLookup::Hit(payload) => match serde_json::from_str(&payload) {
                Ok(value) => {
                    debug!(%key, "Returning value from cache");
                    Some(value)
                }
                Err(err) => {
                    warn!(%key, error = %err, "Discarding malformed cached value");
                    None
                }
            },
            CacheLookup::Miss => {
                debug!(%key, "No value in cache for key");
                None
            }
            CacheLookup::Unavailable(err) => {
                error!(%key, error = %err, "Failed to get value from cache");
                None
            }
        }
    }

    /// Store a value under a free-form key, overwriting any previous value
    ///
    /// `ttl` of `None` (or zero) uses the default TTL.
    pub async fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let key = self.keys.raw_key(key);
        let payload = serde_json::to_string(value)?;
        let config = self.entry_config(ttl);
        debug!(%key, ttl = ?config.effective_ttl(), "Saving value in cache");
        self.provider
            .set_json(key.as_str(), &payload, config)
            .await
    }

    /// Remove a free-form key; removing an absent key succeeds
    pub async fn delete(&self, key: &str) -> Result<()> {
        let key = self.keys.raw_key(key);
        let removed = self.provider.delete(key.as_str()).await?;
        debug!(%key, removed, "Deleted cache key");
        Ok(())
    }
}

// Entity read-through operations
impl ReadThroughCache {
    /// Read an entity of type `E` through the cache
    ///
    /// Returns `Ok(None)` when the backing store has no such entity. Only
    /// backing-store failures are returned as errors; cache failures fall
    /// back to the backing store. The one exception is an entity type whose
    /// serde implementation does not round-trip (see [`CacheableEntity`]),
    /// which is reported as a `Serialization` error.
    pub async fn get_entity<E, R>(
        &self,
        repository: Arc<R>,
        id: impl Into<EntityId>,
        ttl: Option<Duration>,
    ) -> Result<Option<E>>
    where
        E: CacheableEntity,
        R: EntityRepository<E> + ?Sized + 'static,
    {
        self.get_entity_at(repository, EntityRef::of::<E>(id), ttl)
            .await
    }

    /// Read an entity addressed by an explicit collection name
    pub async fn get_entity_at<E, R>(
        &self,
        repository: Arc<R>,
        entity: EntityRef,
        ttl: Option<Duration>,
    ) -> Result<Option<E>>
    where
        E: CacheableEntity,
        R: EntityRepository<E> + ?Sized + 'static,
    {
        let key = self.keys.entity_key(&entity);

        match self.lookup(&key).await {
            CacheLookup::Hit(payload) => match serde_json::from_str::<E>(&payload) {
                Ok(found) => {
                    debug!(%key, "Returning entity from cache");
                    return Ok(Some(found));
                }
                Err(err) => {
                    warn!(%key, error = %err, "Cached entity is malformed, fetching from backing store");
                }
            },
            CacheLookup::Miss => {
                debug!(%key, "No entity in cache, fetching from backing store");
            }
            CacheLookup::Unavailable(err) => {
                error!(%key, error = %err, "Failed to get entity from cache, fetching from backing store");
            }
        }

        match self
            .fetch_from_backing_store(repository, entity, key.clone(), ttl)
            .await?
        {
            Some(value) => match serde_json::from_value(value) {
                Ok(found) => {
                    debug!(%key, "Returning entity from backing store");
                    Ok(Some(found))
                }
                Err(err) => {
                    error!(%key, error = %err, "Entity does not round-trip through serde");
                    Err(err.into())
                }
            },
            None => Ok(None),
        }
    }

    /// Remove the cached copy of an entity
    ///
    /// Cache-only invalidation: the backing store is not touched. Deleting
    /// an entity that is not cached succeeds.
    pub async fn delete_entity(&self, entity: &EntityRef) -> Result<()> {
        let key = self.keys.entity_key(entity);
        let removed = self.provider.delete(key.as_str()).await?;
        debug!(%key, removed, "Invalidated cached entity");
        Ok(())
    }

    /// Remove the cached copy of an entity of type `E`
    pub async fn delete_entity_of<E>(&self, id: impl Into<EntityId>) -> Result<()>
    where
        E: CacheableEntity,
    {
        self.delete_entity(&EntityRef::of::<E>(id)).await
    }

    async fn fetch_from_backing_store<E, R>(
        &self,
        repository: Arc<R>,
        entity: EntityRef,
        key: CacheKey,
        ttl: Option<Duration>,
    ) -> Result<Option<Value>>
    where
        E: CacheableEntity,
        R: EntityRepository<E> + ?Sized + 'static,
    {
        let provider = Arc::clone(&self.provider);
        let writes = self.pending_writes.clone();
        let config = self.entry_config(ttl).only_if_absent();
        let cache_key = key.clone();

        let fetch = self
            .coalescer
            .backing_reads()
            .coalesce(key.as_str(), move || async move {
                let found = match repository.find_by_id(&entity.id).await {
                    Ok(found) => found,
                    Err(err) => {
                        error!(key = %cache_key, error = %err, "Failed to get entity from backing store");
                        return Err(err);
                    }
                };

                let Some(found) = found else {
                    debug!(key = %cache_key, "Entity not found in backing store");
                    return Ok(None);
                };

                let value = serde_json::to_value(&found)?;
                debug!(
                    key = %cache_key,
                    ttl = ?config.effective_ttl(),
                    "Got entity from backing store, saving in cache"
                );
                writes.spawn(populate(provider, cache_key, value.to_string(), config));
                Ok(Some(value))
            });

        fetch.await.map_err(Error::Shared)
    }
}

/// Opportunistic write-back; failures only cost future hit rate
async fn populate(
    provider: Arc<dyn CacheProvider>,
    key: CacheKey,
    payload: String,
    config: CacheEntryConfig,
) {
    match provider.set_json(key.as_str(), &payload, config).await {
        Ok(()) => debug!(%key, "Saved entity in cache"),
        Err(err) => error!(%key, error = %err, "Error while saving entity to cache"),
    }
}

impl std::fmt::Debug for ReadThroughCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadThroughCache")
            .field("provider", &self.provider.provider_name())
            .field("prefix", &self.keys.prefix())
            .field("default_ttl", &self.default_ttl)
            .field("pending_writes", &self.pending_writes.len())
            .finish()
    }
}
