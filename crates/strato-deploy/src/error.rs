//! Error types for the deployment domain.

/// The result type used throughout strato-deploy.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in deployment operations.
///
/// All of these are tick-local: the reconciler catches them at the tick
/// boundary, logs them, and waits for the next scheduled tick.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The fleet snapshot could not be retrieved.
    #[error("fleet query failed: {message}")]
    Fleet {
        /// Description of the fleet store failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The application bundle could not be retrieved.
    #[error("artifact fetch failed for '{url}': {message}")]
    Fetch {
        /// The bundle URL that was requested.
        url: String,
        /// Description of the fetch failure.
        message: String,
    },

    /// The deployment engine rejected or failed the deploy.
    #[error("deploy failed: {message}")]
    Deploy {
        /// Description of the deploy failure.
        message: String,
    },

    /// The deploy attempt did not complete within its timeout budget.
    #[error("deploy timed out after {budget_secs}s")]
    DeployTimeout {
        /// The budget that was exceeded, in seconds.
        budget_secs: i64,
    },

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure.
        message: String,
    },

    /// Configuration was missing or invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// An error from strato-core.
    #[error("core error: {0}")]
    Core(#[from] strato_core::Error),
}

impl Error {
    /// Creates a new fleet error.
    #[must_use]
    pub fn fleet(message: impl Into<String>) -> Self {
        Self::Fleet {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new fleet error with a source cause.
    #[must_use]
    pub fn fleet_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Fleet {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new fetch error for the given bundle URL.
    #[must_use]
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new deploy error.
    #[must_use]
    pub fn deploy(message: impl Into<String>) -> Self {
        Self::Deploy {
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
