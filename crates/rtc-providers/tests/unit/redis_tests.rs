//! Tests for the Redis cache provider
//!
//! Require a running Redis server; ignored by default.

use rtc_domain::ports::providers::{CacheEntryConfig, CacheProvider};
use rtc_providers::cache::RedisCacheProvider;
use std::time::Duration;

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

fn unique_key(name: &str) -> String {
    format!("rtc-test:{}:{name}", std::process::id())
}

#[test]
fn test_invalid_url_is_configuration_error() {
    let err = RedisCacheProvider::new("not a url").unwrap_err();
    assert!(matches!(err, rtc_domain::Error::Configuration { .. }));
}

#[tokio::test]
#[ignore = "requires a Redis server"]
async fn test_set_get_delete_roundtrip() {
    let provider = RedisCacheProvider::new(&redis_url()).unwrap();
    let key = unique_key("roundtrip");

    provider
        .set_json(&key, r#"{"a":1}"#, CacheEntryConfig::default())
        .await
        .unwrap();
    assert_eq!(provider.get_json(&key).await.unwrap().as_deref(), Some(r#"{"a":1}"#));
    assert!(provider.exists(&key).await.unwrap());

    assert!(provider.delete(&key).await.unwrap());
    assert!(!provider.delete(&key).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a Redis server"]
async fn test_entries_expire() {
    let provider = RedisCacheProvider::new(&redis_url()).unwrap();
    let key = unique_key("expiry");

    provider
        .set_json(&key, "1", CacheEntryConfig::new().with_ttl(Duration::from_millis(100)))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(provider.get_json(&key).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires a Redis server"]
async fn test_only_if_absent_does_not_overwrite() {
    let provider = RedisCacheProvider::new(&redis_url()).unwrap();
    let key = unique_key("nx");

    provider
        .set_json(&key, "first", CacheEntryConfig::default())
        .await
        .unwrap();
    provider
        .set_json(&key, "second", CacheEntryConfig::default().only_if_absent())
        .await
        .unwrap();

    assert_eq!(provider.get_json(&key).await.unwrap().as_deref(), Some("first"));
    provider.delete(&key).await.unwrap();
}
