//! Tests for the Moka cache provider
//!
//! Moka expires entries on the wall clock, so TTL tests use short real TTLs.

use rtc_domain::ports::providers::{CacheEntryConfig, CacheProvider};
use rtc_providers::cache::MokaCacheProvider;
use std::time::Duration;

fn short_ttl() -> CacheEntryConfig {
    CacheEntryConfig::new().with_ttl(Duration::from_millis(50))
}

#[tokio::test]
async fn test_set_then_get() {
    let provider = MokaCacheProvider::new();

    provider
        .set_json("User:u1", r#"{"id":"u1"}"#, CacheEntryConfig::default())
        .await
        .unwrap();

    assert_eq!(
        provider.get_json("User:u1").await.unwrap().as_deref(),
        Some(r#"{"id":"u1"}"#)
    );
    assert!(provider.exists("User:u1").await.unwrap());
}

#[tokio::test]
async fn test_entry_expires_after_its_own_ttl() {
    let provider = MokaCacheProvider::new();

    provider.set_json("short", "1", short_ttl()).await.unwrap();
    provider
        .set_json("long", "2", CacheEntryConfig::default())
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(provider.get_json("short").await.unwrap(), None);
    assert_eq!(provider.get_json("long").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn test_only_if_absent_keeps_existing_entry() {
    let provider = MokaCacheProvider::new();

    provider
        .set_json("k", "first", CacheEntryConfig::default())
        .await
        .unwrap();
    provider
        .set_json("k", "second", CacheEntryConfig::default().only_if_absent())
        .await
        .unwrap();

    assert_eq!(provider.get_json("k").await.unwrap().as_deref(), Some("first"));
}

#[tokio::test]
async fn test_only_if_absent_writes_after_expiry() {
    let provider = MokaCacheProvider::new();

    provider.set_json("k", "first", short_ttl()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    provider
        .set_json("k", "second", CacheEntryConfig::default().only_if_absent())
        .await
        .unwrap();

    assert_eq!(provider.get_json("k").await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn test_overwrite_replaces_value() {
    let provider = MokaCacheProvider::new();

    provider
        .set_json("k", "first", CacheEntryConfig::default())
        .await
        .unwrap();
    provider
        .set_json("k", "second", CacheEntryConfig::default())
        .await
        .unwrap();

    assert_eq!(provider.get_json("k").await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn test_delete_reports_presence() {
    let provider = MokaCacheProvider::new();
    provider
        .set_json("k", "1", CacheEntryConfig::default())
        .await
        .unwrap();

    assert!(provider.delete("k").await.unwrap());
    assert!(!provider.delete("k").await.unwrap());
    assert_eq!(provider.get_json("k").await.unwrap(), None);
}

#[tokio::test]
async fn test_stats_count_hits_and_misses() {
    let provider = MokaCacheProvider::with_capacity(100);
    provider
        .set_json("k", "1", CacheEntryConfig::default())
        .await
        .unwrap();

    provider.get_json("k").await.unwrap();
    provider.get_json("missing").await.unwrap();

    let stats = provider.stats().await.unwrap();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.entries, 1);
    assert!((stats.hit_rate - 0.5).abs() < f64::EPSILON);
    assert_eq!(provider.max_capacity(), 100);
}
