//! Value Objects
//!
//! Immutable types describing what is cached and under which key.

pub mod cache_key;
pub mod entity;

pub use cache_key::{CacheKey, KeyBuilder};
pub use entity::{EntityId, EntityRef};
