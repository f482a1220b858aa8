//! Main application configuration

use super::cache::CacheConfig;
use super::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Root configuration, resolved once at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Cache store and key settings
    pub cache: CacheConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}
