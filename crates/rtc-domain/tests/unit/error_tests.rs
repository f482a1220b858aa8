//! Error taxonomy tests

use rtc_domain::error::Error;
use std::sync::Arc;

#[test]
fn test_shared_error_exposes_root() {
    let original = Error::backing_store("connection reset");
    let shared = Error::Shared(Arc::new(original));

    assert!(shared.is_backing_store());
    assert!(!shared.is_cache_unavailable());
    assert_eq!(shared.to_string(), "Backing store error: connection reset");
}

#[test]
fn test_nested_shared_error_root() {
    let inner = Arc::new(Error::cache_unavailable("timeout"));
    let outer = Error::Shared(Arc::new(Error::Shared(inner)));

    assert!(matches!(outer.root(), Error::CacheUnavailable { .. }));
}

#[test]
fn test_json_error_converts_to_serialization() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: Error = json_err.into();
    assert!(err.is_serialization());
}

#[test]
fn test_error_with_source_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let err = Error::cache_unavailable_with_source("Redis GET failed", io);

    assert!(std::error::Error::source(&err).is_some());
    assert!(err.to_string().contains("Redis GET failed"));
}
