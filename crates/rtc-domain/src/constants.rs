//! Domain constants
//!
//! Values that are part of the cache contract itself. Infrastructure
//! defaults live in `rtc_infrastructure::constants`.

/// Default time to live for entries written through the cache (seconds)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Separator between the collection name and the identifier in entity keys
pub const CACHE_NAMESPACE_SEPARATOR: &str = ":";

/// Default key prefix (no prefix)
pub const DEFAULT_KEY_PREFIX: &str = "";
