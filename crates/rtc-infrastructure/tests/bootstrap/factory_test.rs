//! Cache Factory Tests

use rtc_infrastructure::bootstrap::{
    build_cache_provider, build_read_through_cache, build_read_through_cache_with,
    cache_provider_config,
};
use rtc_infrastructure::config::{CacheConfig, CacheProviderKind, ConfigBuilder};
use rtc_providers::cache::NullCacheProvider;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

fn moka_config() -> CacheConfig {
    CacheConfig {
        provider: CacheProviderKind::Moka,
        max_capacity: 100,
        ..CacheConfig::default()
    }
}

#[test]
fn test_registry_config_for_redis_uses_host_and_port() {
    let config = CacheConfig {
        redis_host: "cache.internal".to_string(),
        redis_port: 6380,
        ..CacheConfig::default()
    };

    let registry_config = cache_provider_config(&config);

    assert_eq!(registry_config.provider, "redis");
    assert_eq!(registry_config.uri.as_deref(), Some("redis://cache.internal:6380"));
    assert_eq!(registry_config.ttl_secs, Some(60));
}

#[test]
fn test_registry_config_for_moka_uses_capacity() {
    let registry_config = cache_provider_config(&moka_config());

    assert_eq!(registry_config.provider, "moka");
    assert_eq!(registry_config.max_capacity, Some(100));
    assert!(registry_config.uri.is_none());
}

#[test]
fn test_build_each_provider() {
    for kind in [
        CacheProviderKind::Redis,
        CacheProviderKind::Moka,
        CacheProviderKind::Null,
    ] {
        let config = CacheConfig {
            provider: kind,
            ..CacheConfig::default()
        };
        let provider = build_cache_provider(&config).unwrap();
        assert_eq!(provider.provider_name(), kind.as_str());
    }
}

#[tokio::test]
async fn test_read_through_cache_from_config() {
    let app = ConfigBuilder::new()
        .with_cache(moka_config())
        .with_key_prefix("app:")
        .with_default_ttl_secs(30)
        .build();

    let cache = build_read_through_cache(&app).unwrap();
    assert_eq!(cache.default_ttl(), Duration::from_secs(30));
    assert_eq!(cache.key_builder().prefix(), "app:");

    cache.set("foo", &json!({"a": 1}), None).await.unwrap();
    assert_eq!(cache.get::<Value>("foo").await, Some(json!({"a": 1})));

    // Stored under the prefixed key
    let raw = cache.provider().get_json("app:foo").await.unwrap();
    assert_eq!(raw.as_deref(), Some(r#"{"a":1}"#));
}

#[tokio::test]
async fn test_read_through_cache_with_injected_provider() {
    let cache =
        build_read_through_cache_with(Arc::new(NullCacheProvider::new()), &CacheConfig::default());

    cache.set("foo", &1, None).await.unwrap();
    assert_eq!(cache.get::<i32>("foo").await, None);
    assert_eq!(cache.provider().provider_name(), "null");
}
