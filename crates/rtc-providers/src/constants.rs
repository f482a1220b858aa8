//! Provider Constants
//!
//! Constants specific to provider implementations. Domain-wide defaults (such
//! as the entry TTL) live in `rtc-domain`.

/// Default maximum number of entries held by the Moka provider
pub const MOKA_DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Longest expiry sent with `SET ... PX` (ten years); Redis rejects expiry
/// times that overflow its millisecond clock
pub const REDIS_MAX_TTL_MILLIS: u64 = 10 * 365 * 24 * 60 * 60 * 1000;

/// Redis URI used when none is configured
pub const REDIS_DEFAULT_URI: &str = "redis://127.0.0.1:6379";
