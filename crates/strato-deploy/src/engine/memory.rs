//! In-memory deployment engine for testing.
//!
//! [`InMemoryDeployEngine`] records every deploy call and can be configured
//! to fail or to respond slowly, which is how timeout-budget expiry is
//! exercised in tests.
//!
//! ## Limitations
//!
//! - **NOT suitable for production**: Nothing is deployed anywhere
//! - **Single-process only**: Recorded calls are not visible across
//!   process boundaries

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use super::{ApplicationId, DeployEngine, DeployParams};
use crate::artifact::ApplicationBundle;
use crate::error::{Error, Result};

/// One recorded deploy call.
#[derive(Debug, Clone)]
pub struct RecordedDeploy {
    /// Application identity the deploy targeted.
    pub application_id: ApplicationId,
    /// Version string passed to the engine.
    pub version: String,
    /// URL the bundle was retrieved from.
    pub bundle_url: String,
    /// Size of the bundle payload in bytes.
    pub bundle_len: usize,
}

/// Internal engine state protected by a single lock.
#[derive(Debug, Default)]
struct EngineState {
    deploys: Vec<RecordedDeploy>,
    fail_with: Option<String>,
    delay: Option<Duration>,
}

/// In-memory deployment engine for testing.
#[derive(Debug, Default)]
pub struct InMemoryDeployEngine {
    state: RwLock<EngineState>,
}

fn poison_err<T>(_: PoisonError<T>) -> Error {
    Error::deploy("deploy engine lock poisoned")
}

impl InMemoryDeployEngine {
    /// Creates a new in-memory engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures every subsequent deploy to fail with `message`.
    ///
    /// Pass `None` to clear a previously configured failure.
    pub fn set_failure(&self, message: Option<String>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.fail_with = message;
    }

    /// Configures an artificial delay before each deploy completes.
    ///
    /// Pass `None` to clear a previously configured delay.
    pub fn set_delay(&self, delay: Option<Duration>) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.delay = delay;
    }

    /// Returns all recorded deploy calls.
    #[must_use]
    pub fn deploys(&self) -> Vec<RecordedDeploy> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .deploys
            .clone()
    }

    /// Returns the number of recorded deploy calls.
    #[must_use]
    pub fn deploy_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .deploys
            .len()
    }
}

#[async_trait]
impl DeployEngine for InMemoryDeployEngine {
    async fn deploy(&self, bundle: &ApplicationBundle, params: &DeployParams) -> Result<()> {
        let (delay, fail_with) = {
            let state = self.state.read().map_err(poison_err)?;
            (state.delay, state.fail_with.clone())
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = fail_with {
            return Err(Error::deploy(message));
        }

        let mut state = self.state.write().map_err(poison_err)?;
        state.deploys.push(RecordedDeploy {
            application_id: params.application_id().clone(),
            version: params.version().to_string(),
            bundle_url: bundle.url().to_string(),
            bundle_len: bundle.len(),
        });

        Ok(())
    }

    fn engine_name(&self) -> &str {
        "in-memory"
    }
}
