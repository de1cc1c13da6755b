//! Error types and result aliases for Strato.
//!
//! This module defines the shared error types used across all Strato
//! components. Errors are structured for programmatic handling and include
//! context for debugging.

/// The result type used throughout Strato.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Strato core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An invalid version string was provided.
    #[error("invalid version: {message}")]
    InvalidVersion {
        /// Description of what made the version invalid.
        message: String,
    },

    /// An invalid zone identity was provided.
    #[error("invalid zone identity: {message}")]
    InvalidZone {
        /// Description of what made the zone identity invalid.
        message: String,
    },

    /// Configuration was missing or invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl Error {
    /// Creates a new configuration error with the given message.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
