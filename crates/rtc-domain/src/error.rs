//! Error handling types

use std::sync::Arc;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the read-through cache
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Payload could not be encoded to or decoded from JSON
    #[error("Serialization error: {source}")]
    Serialization {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Transport or protocol failure talking to the cache store
    #[error("Cache unavailable: {message}")]
    CacheUnavailable {
        /// Description of the cache failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Query failure against the primary (backing) store
    #[error("Backing store error: {message}")]
    BackingStore {
        /// Description of the backing store failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },

    /// An error produced once by a coalesced fetch and handed to every waiter
    #[error(transparent)]
    Shared(#[from] Arc<Error>),
}

// Basic error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Cache and backing store error creation methods
impl Error {
    /// Create a cache unavailable error
    pub fn cache_unavailable<S: Into<String>>(message: S) -> Self {
        Self::CacheUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a cache unavailable error with source
    pub fn cache_unavailable_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::CacheUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a backing store error
    pub fn backing_store<S: Into<String>>(message: S) -> Self {
        Self::BackingStore {
            message: message.into(),
            source: None,
        }
    }

    /// Create a backing store error with source
    pub fn backing_store_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::BackingStore {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Inspection helpers
impl Error {
    /// The error that actually happened, looking through shared wrappers
    pub fn root(&self) -> &Error {
        match self {
            Self::Shared(inner) => inner.root(),
            other => other,
        }
    }

    /// True if the error originated in the backing store
    pub fn is_backing_store(&self) -> bool {
        matches!(self.root(), Self::BackingStore { .. })
    }

    /// True if the error originated in the cache store
    pub fn is_cache_unavailable(&self) -> bool {
        matches!(self.root(), Self::CacheUnavailable { .. })
    }

    /// True if the error is a JSON encode/decode failure
    pub fn is_serialization(&self) -> bool {
        matches!(self.root(), Self::Serialization { .. })
    }
}
