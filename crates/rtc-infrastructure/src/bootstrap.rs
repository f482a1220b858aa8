//! Bootstrap
//!
//! Wires resolved configuration to a concrete cache provider from the
//! registry and builds the read-through cache on top of it.

use crate::config::{AppConfig, CacheConfig, CacheProviderKind};
use rtc_application::ports::registry::{CacheProviderConfig, resolve_cache_provider};
use rtc_application::use_cases::{CacheOptions, ReadThroughCache};
use rtc_domain::error::Result;
use rtc_domain::ports::providers::CacheProvider;
use std::sync::Arc;
use tracing::info;

/// Registry configuration for the configured cache provider
pub fn cache_provider_config(config: &CacheConfig) -> CacheProviderConfig {
    let registry_config = CacheProviderConfig::new(config.provider.as_str())
        .with_ttl_secs(config.default_ttl_secs);

    match config.provider {
        CacheProviderKind::Redis => registry_config.with_uri(config.redis_uri()),
        CacheProviderKind::Moka => registry_config.with_max_capacity(config.max_capacity),
        CacheProviderKind::Null => registry_config,
    }
}

/// Options for the read-through cache derived from configuration
pub fn cache_options(config: &CacheConfig) -> CacheOptions {
    CacheOptions::new()
        .with_default_ttl(config.default_ttl())
        .with_key_prefix(config.key_prefix.clone())
}

/// Create the configured cache provider
pub fn build_cache_provider(config: &CacheConfig) -> Result<Arc<dyn CacheProvider>> {
    let provider = resolve_cache_provider(&cache_provider_config(config))?;
    info!(provider = provider.provider_name(), "Cache provider created");
    Ok(provider)
}

/// Create a read-through cache over the configured provider
pub fn build_read_through_cache(config: &AppConfig) -> Result<ReadThroughCache> {
    let provider = build_cache_provider(&config.cache)?;
    Ok(ReadThroughCache::new(provider, cache_options(&config.cache)))
}

/// Create a read-through cache over a provider the caller already built
///
/// Used when the application injects its own connection, for example a
/// `RedisCacheProvider::with_connection_manager`.
pub fn build_read_through_cache_with(
    provider: Arc<dyn CacheProvider>,
    config: &CacheConfig,
) -> ReadThroughCache {
    ReadThroughCache::new(provider, cache_options(config))
}
