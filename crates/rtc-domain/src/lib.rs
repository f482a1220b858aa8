//! # Domain Layer
//!
//! Core types of the read-through cache: the error taxonomy, the cache key
//! builder, entity references and the port traits that adapters implement.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | `Error` enum and `Result` alias |
//! | [`constants`] | Default TTL, key separator |
//! | [`value_objects`] | `CacheKey`, `KeyBuilder`, `EntityId`, `EntityRef` |
//! | [`ports`] | `CacheProvider` (cache store adapter) |
//! | [`repositories`] | `EntityRepository` (backing store adapter) |

pub mod constants;
pub mod error;
pub mod ports;
pub mod repositories;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::providers::{CacheEntryConfig, CacheProvider, CacheStats};
pub use repositories::{CacheableEntity, EntityRepository};
pub use value_objects::{CacheKey, EntityId, EntityRef, KeyBuilder};
