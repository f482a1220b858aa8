//! In-flight request coalescing
//!
//! Collapses concurrent fetches for the same cache key into one underlying
//! operation. The first caller for a key opens a *ticket* holding a shared
//! future; every caller arriving while the ticket is open joins that future
//! instead of fetching again. All of them observe the same value or the same
//! error.
//!
//! ```text
//! Caller A ─┐
//!           │                          fetch_fn()
//! Caller B ─┼──► InFlightRegistry ───────────────► store
//!           │         │                              │
//! Caller C ─┘         │                              │
//!                     ▼                              ▼
//!               [A, B, C await the       [one operation; its ticket is
//!                same shared future] ◄──  removed before it resolves]
//! ```
//!
//! A ticket removes itself from the registry (matched by ticket id) as the
//! last step of its fetch, before the shared result becomes visible to any
//! waiter. A request arriving afterwards always starts a fresh fetch; results
//! are never reused past the coalescing window.
//!
//! The ticket is closed on every outcome: success, error, a panicking fetch,
//! or every waiter going away. The registry only holds a weak handle, so the
//! fetch lives exactly as long as somebody awaits it.
//!
//! The shared future is driven by whichever waiter polls it. Dropping one
//! waiter does not cancel the fetch for the others; dropping the last one
//! cancels it. There is no timeout at this layer: a fetch that never
//! completes keeps its ticket open while it is awaited.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::future::{BoxFuture, FutureExt, Shared, WeakShared};
use rtc_domain::error::{Error, Result};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Outcome of a coalesced fetch, cloneable so every waiter gets a copy
pub type SharedResult<T> = std::result::Result<T, Arc<Error>>;

/// Future handed to every caller attached to a ticket
pub type SharedFetch<T> = Shared<BoxFuture<'static, SharedResult<T>>>;

type Tickets<T> = Arc<DashMap<String, Ticket<T>>>;

struct Ticket<T> {
    id: u64,
    fetch: Option<WeakShared<BoxFuture<'static, SharedResult<T>>>>,
}

/// Closes a ticket when its fetch finishes, unwinds or is dropped
struct TicketGuard<T> {
    tickets: Tickets<T>,
    key: String,
    id: u64,
}

impl<T> Drop for TicketGuard<T> {
    fn drop(&mut self) {
        // Match on id: a newer ticket may already own the key
        self.tickets
            .remove_if(&self.key, |_, ticket| ticket.id == self.id);
    }
}

/// Statistics for monitoring coalescing effectiveness.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CoalescerStats {
    /// Total requests received
    pub total_requests: u64,
    /// Requests that joined an in-flight fetch
    pub coalesced_requests: u64,
    /// Requests that opened a new ticket
    pub new_requests: u64,
    /// Tickets currently open
    pub in_flight: usize,
}

impl CoalescerStats {
    /// Returns the coalescing ratio (0.0 to 1.0)
    #[allow(clippy::cast_precision_loss)]
    pub fn coalescing_ratio(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.coalesced_requests as f64 / self.total_requests as f64
        }
    }
}

/// Registry of open tickets, keyed by cache key
pub struct InFlightRegistry<T> {
    name: &'static str,
    tickets: Tickets<T>,
    next_ticket: AtomicU64,
    total_requests: AtomicU64,
    coalesced_requests: AtomicU64,
    new_requests: AtomicU64,
}

impl<T> InFlightRegistry<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty registry; `name` labels its log lines
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            tickets: Arc::new(DashMap::new()),
            next_ticket: AtomicU64::new(0),
            total_requests: AtomicU64::new(0),
            coalesced_requests: AtomicU64::new(0),
            new_requests: AtomicU64::new(0),
        }
    }

    /// Join the in-flight fetch for `key`, or start one with `fetch`.
    ///
    /// `fetch` is only invoked when no ticket is open for `key`. It runs while
    /// the registry shard is locked and must only build the future, not touch
    /// this registry.
    pub fn coalesce<F, Fut>(&self, key: &str, fetch: F) -> SharedFetch<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        self.total_requests.fetch_add(1, Ordering::Relaxed);

        // Entry API keeps check-and-insert atomic per key
        match self.tickets.entry(key.to_owned()) {
            Entry::Occupied(mut entry) => {
                let live = entry.get().fetch.as_ref().and_then(WeakShared::upgrade);
                if let Some(fetch) = live {
                    self.coalesced_requests.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        registry = self.name,
                        key,
                        ticket = entry.get().id,
                        "Joining in-flight fetch"
                    );
                    return fetch;
                }
                // Every waiter left before the old ticket closed
                let (ticket, fetch) = self.open_ticket(entry.key().clone(), fetch);
                entry.insert(ticket);
                fetch
            }
            Entry::Vacant(entry) => {
                let (ticket, fetch) = self.open_ticket(entry.key().clone(), fetch);
                entry.insert(ticket);
                fetch
            }
        }
    }

    fn open_ticket<F, Fut>(&self, key: String, fetch: F) -> (Ticket<T>, SharedFetch<T>)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let id = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        self.new_requests.fetch_add(1, Ordering::Relaxed);
        debug!(registry = self.name, key = %key, ticket = id, "Opened ticket");

        let pending = fetch();
        let guard = TicketGuard {
            tickets: Arc::clone(&self.tickets),
            key,
            id,
        };
        let shared = async move {
            let _guard = guard;
            pending.await.map_err(Arc::new)
        }
        .boxed()
        .shared();

        let ticket = Ticket {
            id,
            fetch: shared.downgrade(),
        };
        (ticket, shared)
    }

    /// Number of tickets currently open
    pub fn in_flight(&self) -> usize {
        self.tickets.len()
    }

    /// True if a fetch for `key` is in progress
    pub fn is_in_flight(&self, key: &str) -> bool {
        self.tickets.contains_key(key)
    }

    /// Snapshot of the registry counters
    pub fn stats(&self) -> CoalescerStats {
        CoalescerStats {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            coalesced_requests: self.coalesced_requests.load(Ordering::Relaxed),
            new_requests: self.new_requests.load(Ordering::Relaxed),
            in_flight: self.in_flight(),
        }
    }
}

impl<T> std::fmt::Debug for InFlightRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InFlightRegistry")
            .field("name", &self.name)
            .field("in_flight", &self.tickets.len())
            .finish()
    }
}

/// Per-registry statistics of a [`RequestCoalescer`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestCoalescerStats {
    /// Cache-store reads
    pub cache_reads: CoalescerStats,
    /// Backing-store reads
    pub backing_reads: CoalescerStats,
}

/// Owner of the two independent in-flight registries
///
/// Cache-store reads and backing-store reads for the same key are tracked
/// separately: a cache read resolving never interferes with a backing read
/// for the same key. Instances are independent, so several coalescers can
/// live in one process (for example one per tenant).
#[derive(Debug)]
pub struct RequestCoalescer {
    cache_reads: InFlightRegistry<Option<String>>,
    backing_reads: InFlightRegistry<Option<Value>>,
}

impl RequestCoalescer {
    /// Create a coalescer with empty registries
    pub fn new() -> Self {
        Self {
            cache_reads: InFlightRegistry::new("cache"),
            backing_reads: InFlightRegistry::new("backing"),
        }
    }

    /// Registry for cache-store reads (payload text)
    pub fn cache_reads(&self) -> &InFlightRegistry<Option<String>> {
        &self.cache_reads
    }

    /// Registry for backing-store reads (entity as JSON value)
    pub fn backing_reads(&self) -> &InFlightRegistry<Option<Value>> {
        &self.backing_reads
    }

    /// Statistics of both registries
    pub fn stats(&self) -> RequestCoalescerStats {
        RequestCoalescerStats {
            cache_reads: self.cache_reads.stats(),
            backing_reads: self.backing_reads.stats(),
        }
    }
}

impl Default for RequestCoalescer {
    fn default() -> Self {
        Self::new()
    }
}
