//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns for the read-through cache.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, TOML file, environment |
//! | [`logging`] | Structured logging with tracing |
//! | [`bootstrap`] | Configuration to provider to read-through cache wiring |
//! | [`error_ext`] | Context helpers mapping foreign errors to domain errors |
//! | [`constants`] | Infrastructure defaults |

// Link the provider crate so its registry entries are collected
extern crate rtc_providers;

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{build_cache_provider, build_read_through_cache};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
