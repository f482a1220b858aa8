//! Configuration
//!
//! Layered configuration with figment: built-in defaults, then a TOML file,
//! then `RTC_`-prefixed environment variables (`__` separates nested keys).
//!
//! ```toml
//! [cache]
//! provider = "redis"
//! default_ttl_secs = 60
//! key_prefix = "app:"
//! redis_host = "127.0.0.1"
//! redis_port = 6379
//!
//! [logging]
//! level = "info"
//! ```

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, CacheConfig, CacheProviderKind, LoggingConfig};
