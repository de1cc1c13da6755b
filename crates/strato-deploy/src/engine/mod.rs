//! Deployment engine abstraction.
//!
//! This module provides:
//!
//! - [`DeployEngine`]: Trait for triggering deploys against an external
//!   deployment engine
//! - [`DeployParams`]: Parameters for a single deploy attempt
//! - [`ApplicationId`]: Identity of the application being deployed
//!
//! ## Design Principles
//!
//! - **One capability, one method**: The engine is external and opaque;
//!   this core only ever issues a single deploy attempt per tick
//! - **Outcome passed through**: The engine's result is returned unchanged;
//!   interpretation happens at the tick boundary
//! - **Bounded**: Every attempt carries a [`TimeoutBudget`]; the caller
//!   abandons the call on expiry

pub mod http;
pub mod memory;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use strato_core::Version;

use crate::artifact::ApplicationBundle;
use crate::budget::TimeoutBudget;
use crate::error::Result;

/// Identity of an application known to the deployment engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationId {
    tenant: String,
    application: String,
    instance: String,
}

impl ApplicationId {
    /// Creates an application identity from its parts.
    #[must_use]
    pub fn new(
        tenant: impl Into<String>,
        application: impl Into<String>,
        instance: impl Into<String>,
    ) -> Self {
        Self {
            tenant: tenant.into(),
            application: application.into(),
            instance: instance.into(),
        }
    }

    /// Returns the fixed identity of the platform's internal routing
    /// application.
    ///
    /// This is not a user application; it is constant across all deploys
    /// issued by this core.
    #[must_use]
    pub fn zone_application() -> Self {
        Self::new("platform", "routing", "default")
    }

    /// Returns the tenant name.
    #[must_use]
    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// Returns the application name.
    #[must_use]
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Returns the instance name.
    #[must_use]
    pub fn instance(&self) -> &str {
        &self.instance
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.tenant, self.application, self.instance)
    }
}

/// Parameters for a single deploy attempt.
///
/// Built fresh per attempt; the budget inside is never reused.
#[derive(Debug, Clone)]
pub struct DeployParams {
    application_id: ApplicationId,
    version: Version,
    budget: TimeoutBudget,
}

impl DeployParams {
    /// Creates deploy parameters.
    #[must_use]
    pub const fn new(application_id: ApplicationId, version: Version, budget: TimeoutBudget) -> Self {
        Self {
            application_id,
            version,
            budget,
        }
    }

    /// Returns the application identity being deployed.
    #[must_use]
    pub fn application_id(&self) -> &ApplicationId {
        &self.application_id
    }

    /// Returns the target version.
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Returns the timeout budget bounding this attempt.
    #[must_use]
    pub fn budget(&self) -> &TimeoutBudget {
        &self.budget
    }
}

/// Deployment engine capability.
///
/// Implementations may target a config server's deploy API or an
/// in-memory double for tests. The engine is treated as opaque and
/// synchronous from the reconciler's point of view: one call, one outcome.
///
/// ## Thread Safety
///
/// All methods are `Send + Sync`; the reconciler shares the engine behind
/// an `Arc`.
#[async_trait]
pub trait DeployEngine: Send + Sync {
    /// Applies the bundle to the running cluster.
    ///
    /// Invoked at most once per reconciliation tick. The outcome is
    /// returned unchanged; the caller bounds the whole call with the
    /// params' timeout budget and abandons it on expiry.
    async fn deploy(&self, bundle: &ApplicationBundle, params: &DeployParams) -> Result<()>;

    /// Returns the engine's name for logging.
    fn engine_name(&self) -> &str;
}
