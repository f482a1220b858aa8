//! Use cases

pub mod read_through;

pub use read_through::{CacheOptions, ReadThroughCache};
