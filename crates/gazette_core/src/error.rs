//! # Gazette Error Types
//!
//! The only failures this crate and its callers treat as errors are the
//! ones that happen once, at startup. A missed non-blocking enter or an
//! elapsed rendezvous wait is an ordinary return value, not an error.

use thiserror::Error;

/// Errors that can occur while setting up a gazette process.
#[derive(Error, Debug)]
pub enum GazetteError {
    /// An independently scheduled execution unit could not be created.
    ///
    /// Surfaced exactly once at startup and never retried; the affected
    /// actor must not run with a missing primitive.
    #[error("could not spawn actor {actor}: {source}")]
    ResourceCreation {
        /// Name of the actor that failed to start.
        actor: String,
        /// The underlying spawn failure.
        #[source]
        source: std::io::Error,
    },

    /// Configuration rejected before any actor was started.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for gazette setup operations.
pub type GazetteResult<T> = Result<T, GazetteError>;
