//! Cache configuration types

use crate::constants::{DEFAULT_REDIS_HOST, DEFAULT_REDIS_PORT};
use rtc_domain::constants::{DEFAULT_CACHE_TTL_SECS, DEFAULT_KEY_PREFIX};
use rtc_providers::constants::MOKA_DEFAULT_MAX_CAPACITY;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Cache providers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheProviderKind {
    /// Distributed cache (Redis)
    Redis,
    /// In-process cache (Moka)
    Moka,
    /// Caching disabled
    Null,
}

impl CacheProviderKind {
    /// Registry name of the provider
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Redis => "redis",
            Self::Moka => "moka",
            Self::Null => "null",
        }
    }
}

impl fmt::Display for CacheProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache provider
    pub provider: CacheProviderKind,

    /// Default TTL in seconds
    pub default_ttl_secs: u64,

    /// Prefix prepended to every cache key
    pub key_prefix: String,

    /// Redis URL; takes precedence over host and port
    pub redis_url: Option<String>,

    /// Redis host
    pub redis_host: String,

    /// Redis port
    pub redis_port: u16,

    /// Maximum number of entries (Moka provider)
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Default TTL as a duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Redis connection URI built from `redis_url` or host and port
    pub fn redis_uri(&self) -> String {
        match &self.redis_url {
            Some(url) => url.clone(),
            None => format!("redis://{}:{}", self.redis_host, self.redis_port),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: CacheProviderKind::Redis,
            default_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            redis_url: None,
            redis_host: DEFAULT_REDIS_HOST.to_string(),
            redis_port: DEFAULT_REDIS_PORT,
            max_capacity: MOKA_DEFAULT_MAX_CAPACITY,
        }
    }
}
