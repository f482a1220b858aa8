//! Tests for in-flight request coalescing

use futures::future::{self, join_all};
use rtc_application::coalescer::{InFlightRegistry, RequestCoalescer};
use rtc_domain::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn counting_fetch(
    calls: &Arc<AtomicUsize>,
    value: u32,
) -> impl FnOnce() -> future::BoxFuture<'static, rtc_domain::Result<u32>> {
    let calls = Arc::clone(calls);
    move || {
        calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(value)
        })
    }
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_callers_share_one_fetch() {
    let registry: InFlightRegistry<u32> = InFlightRegistry::new("test");
    let calls = Arc::new(AtomicUsize::new(0));

    let waiters: Vec<_> = (0..8)
        .map(|i| registry.coalesce("user:1", counting_fetch(&calls, i)))
        .collect();
    assert_eq!(registry.in_flight(), 1);

    let results = join_all(waiters).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    for result in results {
        assert_eq!(result.unwrap(), 0, "every caller sees the first fetch's value");
    }

    let stats = registry.stats();
    assert_eq!(stats.total_requests, 8);
    assert_eq!(stats.new_requests, 1);
    assert_eq!(stats.coalesced_requests, 7);
    assert_eq!(stats.in_flight, 0);
}

#[tokio::test(start_paused = true)]
async fn test_request_after_completion_fetches_again() {
    let registry: InFlightRegistry<u32> = InFlightRegistry::new("test");
    let calls = Arc::new(AtomicUsize::new(0));

    let first = registry.coalesce("k", counting_fetch(&calls, 1)).await;
    let second = registry.coalesce("k", counting_fetch(&calls, 2)).await;

    assert_eq!(first.unwrap(), 1);
    assert_eq!(second.unwrap(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_immediate_error_leaves_no_ticket() {
    let registry: InFlightRegistry<u32> = InFlightRegistry::new("test");

    let a = registry.coalesce("k", || future::ready(Err(Error::backing_store("boom"))));
    let b = registry.coalesce("k", || future::ready(Ok(5)));

    let (a, b) = tokio::join!(a, b);
    let (a, b) = (a.unwrap_err(), b.unwrap_err());

    assert!(Arc::ptr_eq(&a, &b), "waiters share the same error");
    assert!(a.is_backing_store());
    assert!(!registry.is_in_flight("k"));
}

#[tokio::test(start_paused = true)]
async fn test_distinct_keys_do_not_coalesce() {
    let registry: InFlightRegistry<u32> = InFlightRegistry::new("test");
    let calls = Arc::new(AtomicUsize::new(0));

    let a = registry.coalesce("a", counting_fetch(&calls, 1));
    let b = registry.coalesce("b", counting_fetch(&calls, 2));
    assert_eq!(registry.in_flight(), 2);

    let (a, b) = tokio::join!(a, b);
    assert_eq!((a.unwrap(), b.unwrap()), (1, 2));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_waiter_does_not_cancel_fetch() {
    let registry: InFlightRegistry<u32> = InFlightRegistry::new("test");
    let calls = Arc::new(AtomicUsize::new(0));

    let first = registry.coalesce("k", counting_fetch(&calls, 9));
    let second = registry.coalesce("k", counting_fetch(&calls, 10));
    drop(first);

    assert_eq!(second.await.unwrap(), 9);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(registry.in_flight(), 0);
}

#[tokio::test]
async fn test_cache_and_backing_registries_are_independent() {
    let coalescer = RequestCoalescer::new();

    let cache = coalescer
        .cache_reads()
        .coalesce("User:1", || future::ready(Ok(None)));
    let backing = coalescer
        .backing_reads()
        .coalesce("User:1", || future::ready(Ok(Some(serde_json::json!({"id": "1"})))));

    assert!(coalescer.cache_reads().is_in_flight("User:1"));
    assert!(coalescer.backing_reads().is_in_flight("User:1"));

    assert_eq!(cache.await.unwrap(), None);
    assert!(coalescer.backing_reads().is_in_flight("User:1"));
    assert!(backing.await.unwrap().is_some());

    let stats = coalescer.stats();
    assert_eq!(stats.cache_reads.new_requests, 1);
    assert_eq!(stats.backing_reads.new_requests, 1);
    assert_eq!(stats.cache_reads.coalesced_requests, 0);
}

#[tokio::test]
async fn test_panicking_fetch_closes_ticket() {
    let registry: Arc<InFlightRegistry<u32>> = Arc::new(InFlightRegistry::new("test"));
    let calls = Arc::new(AtomicUsize::new(0));

    let panicking = Arc::clone(&registry);
    let outcome = tokio::spawn(async move {
        panicking
            .coalesce("k", || async {
                let broken: Option<u32> = None;
                Ok(broken.expect("adapter bug"))
            })
            .await
    })
    .await;

    assert!(outcome.unwrap_err().is_panic());
    assert!(!registry.is_in_flight("k"));

    let value = registry
        .coalesce("k", counting_fetch(&calls, 3))
        .await
        .unwrap();
    assert_eq!(value, 3);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_waiters_close_ticket() {
    let registry: InFlightRegistry<u32> = InFlightRegistry::new("test");
    let calls = Arc::new(AtomicUsize::new(0));

    let slow = registry.coalesce("k", || async {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(1)
    });
    let timed_out = tokio::time::timeout(Duration::from_millis(10), slow).await;

    assert!(timed_out.is_err());
    assert_eq!(registry.in_flight(), 0);

    let value = registry
        .coalesce("k", counting_fetch(&calls, 2))
        .await
        .unwrap();
    assert_eq!(value, 2, "a late caller starts a fresh fetch");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(registry.stats().new_requests, 2);
}
