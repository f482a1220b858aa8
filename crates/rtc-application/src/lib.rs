//! Application Layer - Read-Through Cache
//!
//! Orchestrates the cache-aside read path on top of the domain ports.
//!
//! ## Architecture
//!
//! The application layer:
//! - Coalesces concurrent reads for the same key ([`coalescer`])
//! - Implements the read-through state machine ([`use_cases::ReadThroughCache`])
//! - Declares the provider registry that cache adapters plug into ([`ports::registry`])
//! - Has no dependencies on concrete cache stores
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `rtc-domain`: For the cache port, entity traits and key construction
//! - Pure Rust libraries for async, serialization, etc.

pub mod coalescer;
pub mod ports;
pub mod use_cases;

pub use coalescer::{CoalescerStats, InFlightRegistry, RequestCoalescer, RequestCoalescerStats};
pub use ports::*;
pub use use_cases::*;
