//! # rtc
//!
//! Read-through cache with in-flight request coalescing.
//!
//! Reads check the cache store first; on a miss (or when the cache store is
//! unreachable) they go to the backing store, and the result is written back
//! in the background with a TTL. Concurrent reads for the same key share one
//! cache lookup and one backing-store query.
//!
//! ## Example
//!
//! ```ignore
//! use rtc::{CacheableEntity, ReadThroughCache};
//! use rtc::infrastructure::{ConfigLoader, build_read_through_cache};
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! struct User { id: String, name: String }
//!
//! impl CacheableEntity for User {
//!     fn collection() -> &'static str { "User" }
//! }
//!
//! let config = ConfigLoader::new().load()?;
//! let cache = build_read_through_cache(&config)?;
//! let user: Option<User> = cache.get_entity(users, "u1", None).await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - error taxonomy, cache keys, entity references, ports
//! - `application` - request coalescer, read-through orchestrator, provider registry
//! - `providers` - Redis, Moka and Null cache stores, in-memory backing store
//! - `infrastructure` - configuration, logging, bootstrap

/// Domain layer - core types and port traits
pub mod domain {
    pub use rtc_domain::*;
}

/// Application layer - coalescing and the read-through orchestrator
pub mod application {
    pub use rtc_application::*;
}

/// Provider implementations
pub mod providers {
    pub use rtc_providers::*;
}

/// Infrastructure layer - configuration, logging, bootstrap
pub mod infrastructure {
    pub use rtc_infrastructure::*;
}

/// Command line interface
pub mod cli;

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use application::{
    CacheOptions, CoalescerStats, ReadThroughCache, RequestCoalescer, RequestCoalescerStats,
};
