//! Repository ports for the primary datastore

pub mod entity_repository;

pub use entity_repository::{CacheableEntity, EntityRepository};
