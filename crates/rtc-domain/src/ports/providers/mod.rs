//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | CacheProvider | Key-value cache store with expiration |

/// Cache provider port
pub mod cache;

pub use cache::{CacheEntryConfig, CacheProvider, CacheStats};
