//! Null cache provider
//!
//! Stores nothing. Useful for testing and for running with caching disabled:
//! every read goes to the backing store.

use async_trait::async_trait;
use rtc_application::ports::registry::{CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry};
use rtc_domain::error::Result;
use rtc_domain::ports::providers::{CacheEntryConfig, CacheProvider, CacheStats};
use std::sync::Arc;

/// Null cache provider that doesn't store anything
///
/// # Example
///
/// ```rust
/// use rtc_providers::cache::NullCacheProvider;
///
/// let provider = NullCacheProvider::new();
/// // All operations succeed but nothing is cached
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCacheProvider;

impl NullCacheProvider {
    /// Create a new null cache provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheProvider for NullCacheProvider {
    async fn get_json(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_json(&self, _key: &str, _value: &str, _config: CacheEntryConfig) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn exists(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn stats(&self) -> Result<CacheStats> {
        Ok(CacheStats::new())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

fn null_cache_factory(_config: &CacheProviderConfig) -> Result<Arc<dyn CacheProvider>> {
    Ok(Arc::new(NullCacheProvider::new()))
}

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static NULL_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "null",
    description: "Disabled cache (stores nothing)",
    factory: null_cache_factory,
};
