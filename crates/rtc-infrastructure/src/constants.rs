//! Infrastructure constants
//!
//! Defaults for configuration loading and logging. Cache semantics defaults
//! (entry TTL, key separator) live in `rtc_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "rtc.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "rtc";

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "RTC";

/// Separator for nested keys in environment variables (`RTC_CACHE__PROVIDER`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default Redis host
pub const DEFAULT_REDIS_HOST: &str = "127.0.0.1";

/// Default Redis port
pub const DEFAULT_REDIS_PORT: u16 = 6379;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "RTC_LOG";

/// File name stem used for rotated log files when the path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "rtc";
