//! Application ports
//!
//! The provider port itself lives in `rtc-domain`; it is re-exported here next
//! to the registry that adapters register into.

pub mod registry;

pub use rtc_domain::ports::providers;
