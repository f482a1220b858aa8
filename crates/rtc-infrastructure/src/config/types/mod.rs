//! Configuration types module

pub mod app;
pub mod cache;
pub mod logging;

pub use app::AppConfig;
pub use cache::{CacheConfig, CacheProviderKind};
pub use logging::LoggingConfig;
