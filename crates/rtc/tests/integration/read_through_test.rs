//! End-to-end read-through tests over real providers

use rtc::infrastructure::bootstrap::build_read_through_cache;
use rtc::infrastructure::config::{CacheConfig, CacheProviderKind, ConfigBuilder};
use rtc::providers::InMemoryEntityRepository;
use rtc::{CacheableEntity, EntityRef, ReadThroughCache};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct User {
    id: String,
    name: String,
}

impl CacheableEntity for User {
    fn collection() -> &'static str {
        "User"
    }
}

fn moka_cache(prefix: &str) -> ReadThroughCache {
    let config = ConfigBuilder::new()
        .with_cache(CacheConfig {
            provider: CacheProviderKind::Moka,
            ..CacheConfig::default()
        })
        .with_key_prefix(prefix)
        .build();
    build_read_through_cache(&config).unwrap()
}

fn users() -> Arc<InMemoryEntityRepository<User>> {
    let repo = InMemoryEntityRepository::new().with_latency(Duration::from_millis(50));
    repo.insert(
        "u1",
        User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
        },
    );
    Arc::new(repo)
}

#[tokio::test]
async fn test_concurrent_reads_then_cached_read() {
    let cache = moka_cache("e2e:");
    let repo = users();

    let (a, b) = tokio::join!(
        cache.get_entity::<User, _>(repo.clone(), "u1", None),
        cache.get_entity::<User, _>(repo.clone(), "u1", None),
    );
    assert_eq!(a.unwrap(), b.unwrap());
    assert_eq!(repo.query_count(), 1);

    cache.flush_pending_writes().await;
    let cached = cache
        .provider()
        .get_json("e2e:User:u1")
        .await
        .unwrap()
        .expect("entity written back");
    assert!(cached.contains("Ada"));

    let again: Option<User> = cache.get_entity(repo.clone(), "u1", None).await.unwrap();
    assert_eq!(again.map(|u| u.name).as_deref(), Some("Ada"));
    assert_eq!(repo.query_count(), 1);
}

#[tokio::test]
async fn test_invalidation_forces_backing_read() {
    let cache = moka_cache("");
    let repo = users();

    let _: Option<User> = cache.get_entity(repo.clone(), "u1", None).await.unwrap();
    cache.flush_pending_writes().await;

    cache.delete_entity(&EntityRef::new("User", "u1")).await.unwrap();
    cache.delete_entity(&EntityRef::new("User", "u1")).await.unwrap();

    let _: Option<User> = cache.get_entity(repo.clone(), "u1", None).await.unwrap();
    assert_eq!(repo.query_count(), 2);
}

#[tokio::test]
async fn test_null_provider_always_reads_backing_store() {
    let config = ConfigBuilder::new()
        .with_provider(CacheProviderKind::Null)
        .build();
    let cache = build_read_through_cache(&config).unwrap();
    let repo = users();

    for _ in 0..3 {
        let user: Option<User> = cache.get_entity(repo.clone(), "u1", None).await.unwrap();
        assert!(user.is_some());
        cache.flush_pending_writes().await;
    }
    assert_eq!(repo.query_count(), 3);
}
