//! Redis distributed cache provider
//!
//! Distributed cache implementation using Redis as the backend. Suitable for
//! multi-instance deployments sharing one cache.
//!
//! One [`ConnectionManager`] is used for the lifetime of the provider. It is
//! either injected by the caller or opened lazily on first use and then
//! reused; the manager reconnects on its own after connection loss.
//!
//! ## Example
//!
//! ```ignore
//! use rtc_providers::cache::RedisCacheProvider;
//!
//! let provider = RedisCacheProvider::new("redis://localhost:6379")?;
//! // Or with host/port
//! let provider = RedisCacheProvider::with_host_port("localhost", 6379)?;
//! // Or with a connection the application already holds
//! let provider = RedisCacheProvider::with_connection_manager(manager, "shared");
//! ```

use crate::constants::{REDIS_DEFAULT_URI, REDIS_MAX_TTL_MILLIS};
use async_trait::async_trait;
use redis::Client;
use redis::aio::ConnectionManager;
use rtc_application::ports::registry::{CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry};
use rtc_domain::error::{Error, Result};
use rtc_domain::ports::providers::{CacheEntryConfig, CacheProvider, CacheStats};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;

/// Redis cache provider
#[derive(Clone)]
pub struct RedisCacheProvider {
    client: Option<Client>,
    connection: Arc<OnceCell<ConnectionManager>>,
    server: String,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider with connection string
    ///
    /// No connection is opened until the first command.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::configuration_with_source(format!("Invalid Redis URL '{connection_string}'"), e)
        })?;

        Ok(Self {
            client: Some(client),
            connection: Arc::new(OnceCell::new()),
            server: connection_string.to_string(),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Create a new Redis cache provider with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    /// Create a provider around a connection the caller already opened
    ///
    /// `server` is only used to describe the provider in logs.
    pub fn with_connection_manager(manager: ConnectionManager, server: impl Into<String>) -> Self {
        Self {
            client: None,
            connection: Arc::new(OnceCell::new_with(Some(manager))),
            server: server.into(),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get the Redis server address description
    pub fn server_address(&self) -> &str {
        &self.server
    }

    /// The shared connection, opened on first use
    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                let client = self
                    .client
                    .clone()
                    .ok_or_else(|| Error::internal("Redis provider has neither client nor connection"))?;
                debug!(server = %self.server, "Opening Redis connection");
                client.get_connection_manager().await.map_err(|e| {
                    Error::cache_unavailable_with_source(
                        format!("Failed to connect to Redis at {}", self.server),
                        e,
                    )
                })
            })
            .await?;
        Ok(manager.clone())
    }
}

/// `PX` argument for a TTL: at least 1 ms, at most [`REDIS_MAX_TTL_MILLIS`]
fn px_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis())
        .unwrap_or(u64::MAX)
        .clamp(1, REDIS_MAX_TTL_MILLIS)
}

fn command_failed(command: &str, e: redis::RedisError) -> Error {
    Error::cache_unavailable_with_source(format!("Redis {command} failed: {e}"), e)
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;

        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| command_failed("GET", e))?;

        let counter = if value.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(value)
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let mut conn = self.connection().await?;

        let mut command = redis::cmd("SET");
        command
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(px_millis(config.effective_ttl()));
        if config.only_if_absent {
            command.arg("NX");
        }

        // NX replies nil when the key already exists
        let reply: Option<String> = command
            .query_async(&mut conn)
            .await
            .map_err(|e| command_failed("SET", e))?;
        if reply.is_none() {
            debug!(key, "Entry already present, write skipped");
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;

        let removed: u64 = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| command_failed("DEL", e))?;
        Ok(removed > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;

        let count: u64 = redis::cmd("EXISTS")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| command_failed("EXISTS", e))?;
        Ok(count > 0)
    }

    async fn stats(&self) -> Result<CacheStats> {
        let mut conn = self.connection().await?;

        let entries: u64 = redis::cmd("DBSIZE")
            .query_async(&mut conn)
            .await
            .map_err(|e| command_failed("DBSIZE", e))?;

        let mut stats = CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
            hit_rate: 0.0,
        };
        stats.hit_rate = stats.calculate_hit_rate();
        Ok(stats)
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("server", &self.server)
            .field("connected", &self.connection.initialized())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

/// Factory function for creating Redis cache provider instances.
fn redis_cache_factory(config: &CacheProviderConfig) -> Result<Arc<dyn CacheProvider>> {
    let uri = config.uri.as_deref().unwrap_or(REDIS_DEFAULT_URI);
    Ok(Arc::new(RedisCacheProvider::new(uri)?))
}

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static REDIS_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "redis",
    description: "Redis distributed cache",
    factory: redis_cache_factory,
};
