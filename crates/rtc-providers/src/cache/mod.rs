//! Cache Provider Implementations
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`NullCacheProvider`] | Testing | Stores nothing, every read misses |
//! | [`MokaCacheProvider`] | Local | In-process cache with per-entry TTL |
//! | [`RedisCacheProvider`] | Distributed | Redis-backed, shared between instances |
//!
//! ## Provider Selection Guide
//!
//! - **Development/Testing**: `NullCacheProvider` or `MokaCacheProvider`
//! - **Single Instance**: `MokaCacheProvider`
//! - **Multi Instance**: `RedisCacheProvider`

#[cfg(feature = "cache-moka")]
pub mod moka;
pub mod null;
#[cfg(feature = "cache-redis")]
pub mod redis;

#[cfg(feature = "cache-moka")]
pub use moka::MokaCacheProvider;
pub use null::NullCacheProvider;
#[cfg(feature = "cache-redis")]
pub use redis::RedisCacheProvider;

pub use rtc_domain::ports::providers::{CacheEntryConfig, CacheStats};
