//! # rtc - Provider Implementations
//!
//! Concrete adapters for the ports defined in `rtc-domain`.
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Cache store | `CacheProvider` | Redis, Moka, Null |
//! | Backing store | `EntityRepository<E>` | InMemory |
//!
//! Cache providers register themselves into the `CACHE_PROVIDERS` registry
//! of `rtc-application` and are resolved by name from configuration.
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! rtc-providers = { version = "0.1", default-features = false, features = ["cache-moka"] }
//! ```

pub use rtc_domain::error::{Error, Result};
pub use rtc_domain::ports::providers::CacheProvider;
pub use rtc_domain::repositories::EntityRepository;

/// Provider-specific constants
pub mod constants;

/// Cache provider implementations
///
/// Implements `CacheProvider` for caching backends.
pub mod cache;

/// Backing store implementations
pub mod repository;

#[cfg(feature = "cache-moka")]
pub use cache::MokaCacheProvider;
pub use cache::NullCacheProvider;
#[cfg(feature = "cache-redis")]
pub use cache::RedisCacheProvider;
pub use repository::InMemoryEntityRepository;
