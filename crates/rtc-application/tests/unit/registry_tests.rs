//! Tests for the cache provider registry
//!
//! Uses `extern crate rtc_providers` to force linkme registration of the real
//! providers.

extern crate rtc_providers;

use rtc_application::ports::registry::cache::*;
use rtc_domain::ports::providers::CacheEntryConfig;

#[test]
fn test_list_providers_includes_builtin_providers() {
    let providers = list_cache_providers();

    for expected in ["moka", "null"] {
        assert!(
            providers.iter().any(|(name, _)| *name == expected),
            "{expected} provider should be registered. Available: {providers:?}"
        );
    }
}

#[test]
fn test_provider_names_are_unique() {
    let providers = list_cache_providers();
    let mut names: Vec<_> = providers.iter().map(|(name, _)| *name).collect();
    names.dedup();
    assert_eq!(names.len(), providers.len());
}

#[tokio::test]
async fn test_resolve_null_provider() {
    let provider = resolve_cache_provider(&CacheProviderConfig::new("null"))
        .expect("null provider should resolve");

    assert_eq!(provider.provider_name(), "null");
    provider
        .set_json("k", "1", CacheEntryConfig::default())
        .await
        .unwrap();
    assert_eq!(provider.get_json("k").await.unwrap(), None);
}

#[tokio::test]
async fn test_resolve_moka_provider() {
    let config = CacheProviderConfig::new("moka").with_max_capacity(100);
    let provider = resolve_cache_provider(&config).expect("moka provider should resolve");

    assert_eq!(provider.provider_name(), "moka");
    provider
        .set_json("k", "1", CacheEntryConfig::default())
        .await
        .unwrap();
    assert_eq!(provider.get_json("k").await.unwrap().as_deref(), Some("1"));
}

#[test]
fn test_resolve_unknown_provider_fails() {
    let err = resolve_cache_provider(&CacheProviderConfig::new("memcached")).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Unknown cache provider 'memcached'"), "{message}");
    assert!(message.contains("null"), "{message}");
}
