//! Provider Registry System
//!
//! Cache adapters register themselves at link time through `linkme`
//! distributed slices and are resolved by name from configuration.
//!
//! ```text
//! 1. Provider defines:  #[linkme::distributed_slice(CACHE_PROVIDERS)]
//!                       static ENTRY: CacheProviderEntry = ...
//! 2. Registry declares: #[linkme::distributed_slice]
//!                       pub static CACHE_PROVIDERS: [CacheProviderEntry] = [..]
//! 3. Resolver queries:  CACHE_PROVIDERS.iter()
//! 4. Config selects:    provider = "redis" -> RedisCacheProvider
//! ```
//!
//! ## Registering a Provider (in rtc-providers)
//!
//! ```ignore
//! use rtc_application::ports::registry::{CacheProviderEntry, CACHE_PROVIDERS};
//!
//! #[linkme::distributed_slice(CACHE_PROVIDERS)]
//! static MOKA_PROVIDER: CacheProviderEntry = CacheProviderEntry {
//!     name: "moka",
//!     description: "In-process cache",
//!     factory: moka_factory,
//! };
//! ```

pub mod cache;

pub use cache::{
    CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry, list_cache_providers,
    resolve_cache_provider,
};
