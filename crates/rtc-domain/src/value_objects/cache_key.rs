//! Cache key construction
//!
//! Keys are namespaced by a deployment prefix so several deployments can share
//! one cache store:
//!
//! - entities: `<prefix><collection>:<id>`
//! - free-form keys: `<prefix><key>`

use super::entity::EntityRef;
use crate::constants::{CACHE_NAMESPACE_SEPARATOR, DEFAULT_KEY_PREFIX};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully built cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Deterministic mapping from logical references to cache keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyBuilder {
    prefix: String,
}

impl KeyBuilder {
    /// Create a key builder with the given deployment prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Create a key builder without a prefix
    pub fn unprefixed() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }

    /// The configured prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Key for an entity reference
    pub fn entity_key(&self, entity: &EntityRef) -> CacheKey {
        CacheKey(format!(
            "{}{}{}{}",
            self.prefix, entity.collection, CACHE_NAMESPACE_SEPARATOR, entity.id
        ))
    }

    /// Key for a free-form key/value entry
    pub fn raw_key(&self, key: &str) -> CacheKey {
        CacheKey(format!("{}{}", self.prefix, key))
    }
}
