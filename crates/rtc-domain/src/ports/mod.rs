//! Domain Port Interfaces
//!
//! Boundary contracts implemented by the provider layer. The backing store
//! contract lives in [`crate::repositories`].

/// External service provider ports
pub mod providers;

pub use providers::{CacheEntryConfig, CacheProvider, CacheStats};
