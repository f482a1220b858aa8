//! Backing store repository port

use crate::error::Result;
use crate::value_objects::EntityId;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// An entity that can be read through the cache
///
/// Cached payloads are rebuilt through the type's serde implementation, so
/// each entity type carries its own schema-driven decoder.
///
/// The serde implementation must round-trip: deserializing what `Serialize`
/// produced has to succeed. Entities fetched from the backing store are
/// handed to every coalesced caller in serialized form and rebuilt per
/// caller; a type that fails that rebuild reads as a `Serialization` error.
///
/// # Example
///
/// ```
/// use rtc_domain::repositories::CacheableEntity;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct User {
///     id: String,
///     name: String,
/// }
///
/// impl CacheableEntity for User {
///     fn collection() -> &'static str {
///         "User"
///     }
/// }
/// ```
pub trait CacheableEntity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Backing store collection the entity lives in
    fn collection() -> &'static str;
}

/// Backing store port
///
/// Fetches one entity by identifier from the authoritative store.
/// An entity that does not exist is `Ok(None)`; `Err` is reserved for query
/// failures and is reported as [`Error::BackingStore`].
///
/// [`Error::BackingStore`]: crate::error::Error::BackingStore
#[async_trait]
pub trait EntityRepository<E: CacheableEntity>: Send + Sync {
    /// Find an entity by its identifier
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<E>>;
}
