//! One reconciliation tick: decide, fetch, deploy.
//!
//! The reconciler is invoked by an external scheduler on a fixed interval.
//! The scheduler guarantees that at most one tick runs at a time; this
//! module assumes, and does not itself enforce, that precondition.
//!
//! ```text
//! Idle → Deciding → (NoAction | Fetching → Deploying) → Idle
//! ```
//!
//! Every tick pulls a fresh fleet snapshot; nothing is cached across
//! ticks. Any failure aborts the remainder of the tick and is reported in
//! the returned [`TickSummary`], never propagated out of [`ZoneReconciler::run_tick`].
//! Because decisions are recomputed from scratch each tick, a transient
//! fetch or deploy failure is retried by the next scheduled tick without
//! any persisted retry counter.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::Instrument;

use strato_core::observability::reconcile_span;
use strato_core::{Version, ZoneIdentity};

use crate::artifact::ArtifactFetcher;
use crate::budget::{Clock, TimeoutBudget};
use crate::convergence::{ConvergenceDetector, DeployDecision};
use crate::engine::{ApplicationId, DeployEngine, DeployParams};
use crate::error::Error;
use crate::fleet::NodeSource;
use crate::metrics::DeployMetrics;

/// Default budget for one deploy attempt.
const DEFAULT_DEPLOY_TIMEOUT_SECS: i64 = 60;

/// Immutable reconciler configuration.
///
/// Constructed once at process start; no field changes for the process
/// lifetime.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Zone the deployer operates in.
    pub zone: ZoneIdentity,
    /// Base location bundles are resolved against; expected to end with `/`.
    pub artifact_base_url: String,
    /// Budget for one deploy attempt.
    pub deploy_timeout: chrono::Duration,
}

impl ReconcilerConfig {
    /// Creates a configuration with the default deploy timeout.
    #[must_use]
    pub fn new(zone: ZoneIdentity, artifact_base_url: impl Into<String>) -> Self {
        Self {
            zone,
            artifact_base_url: artifact_base_url.into(),
            deploy_timeout: chrono::Duration::seconds(DEFAULT_DEPLOY_TIMEOUT_SECS),
        }
    }

    /// Overrides the deploy timeout budget.
    #[must_use]
    pub fn with_deploy_timeout(mut self, timeout: chrono::Duration) -> Self {
        self.deploy_timeout = timeout;
        self
    }
}

/// Stage at which a tick failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TickStage {
    /// Reading the fleet snapshot.
    Fleet,
    /// Retrieving the application bundle.
    Fetch,
    /// Triggering the deploy.
    Deploy,
}

/// Outcome of one reconciliation tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TickOutcome {
    /// No deploy was warranted: the fleet is converged, ambiguous, or
    /// silent. A logged no-op, not an error.
    NoAction,
    /// A deploy was triggered and the engine accepted it.
    Deployed {
        /// The version that was deployed.
        version: String,
    },
    /// The tick aborted. The next tick re-evaluates from scratch.
    Failed {
        /// Stage at which the tick aborted.
        stage: TickStage,
        /// Description of the failure.
        message: String,
    },
}

impl TickOutcome {
    /// Returns the label used for metrics and logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoAction => "no_action",
            Self::Deployed { .. } => "deployed",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Serializable summary of one tick.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickSummary {
    /// Outcome of the tick.
    pub outcome: TickOutcome,
    /// Nodes observed in the fleet snapshot (0 if the snapshot failed).
    pub nodes_observed: usize,
    /// Tick duration in milliseconds.
    pub duration_ms: u64,
}

/// Reconciles the zone application against the fleet's version state.
///
/// Composed from capability traits so real collaborators and test doubles
/// are interchangeable.
pub struct ZoneReconciler {
    config: ReconcilerConfig,
    detector: ConvergenceDetector,
    fleet: Arc<dyn NodeSource>,
    fetcher: ArtifactFetcher,
    engine: Arc<dyn DeployEngine>,
    clock: Arc<dyn Clock>,
    metrics: DeployMetrics,
}

impl ZoneReconciler {
    /// Creates a reconciler from its collaborators.
    #[must_use]
    pub fn new(
        config: ReconcilerConfig,
        fleet: Arc<dyn NodeSource>,
        fetcher: ArtifactFetcher,
        engine: Arc<dyn DeployEngine>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            detector: ConvergenceDetector::new(),
            fleet,
            fetcher,
            engine,
            clock,
            metrics: DeployMetrics::new(),
        }
    }

    /// Returns the reconciler's configuration.
    #[must_use]
    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Runs one reconciliation tick.
    ///
    /// Failures never escape: they are logged, counted, and reported in
    /// the summary, leaving the reconciler ready for the next tick.
    pub async fn run_tick(&self) -> TickSummary {
        let span = reconcile_span("run_tick", &self.config.zone.to_string());
        self.tick_inner().instrument(span).await
    }

    async fn tick_inner(&self) -> TickSummary {
        let started = Instant::now();

        let (outcome, nodes_observed) = match self.fleet.list_nodes().await {
            Err(e) => {
                tracing::warn!(error = %e, "failed to read fleet snapshot");
                (
                    TickOutcome::Failed {
                        stage: TickStage::Fleet,
                        message: e.to_string(),
                    },
                    0,
                )
            }
            Ok(nodes) => {
                let observed = nodes.len();
                let outcome = match self.detector.decide(&nodes) {
                    DeployDecision::NoAction => {
                        tracing::debug!(
                            nodes = observed,
                            "fleet converged or ambiguous; nothing to deploy"
                        );
                        TickOutcome::NoAction
                    }
                    DeployDecision::Deploy { target } => self.deploy_target(&target).await,
                };
                (outcome, observed)
            }
        };

        let duration = started.elapsed();
        self.metrics.record_tick(outcome.label());
        self.metrics.observe_tick_duration(duration);

        TickSummary {
            outcome,
            nodes_observed,
            duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Fetches the bundle for `target` and triggers one bounded deploy.
    async fn deploy_target(&self, target: &Version) -> TickOutcome {
        tracing::info!(version = %target, zone = %self.config.zone, "deploying zone application");

        let bundle = match self.fetcher.fetch(&self.config.zone, target).await {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::warn!(version = %target, error = %e, "bundle fetch failed");
                return TickOutcome::Failed {
                    stage: TickStage::Fetch,
                    message: e.to_string(),
                };
            }
        };

        let budget = TimeoutBudget::new(self.clock.as_ref(), self.config.deploy_timeout);
        let params = DeployParams::new(
            ApplicationId::zone_application(),
            target.clone(),
            budget.clone(),
        );
        let remaining = budget
            .remaining(self.clock.as_ref())
            .to_std()
            .unwrap_or_default();

        match tokio::time::timeout(remaining, self.engine.deploy(&bundle, &params)).await {
            Err(_elapsed) => {
                let error = Error::DeployTimeout {
                    budget_secs: self.config.deploy_timeout.num_seconds(),
                };
                tracing::warn!(
                    version = %target,
                    engine = self.engine.engine_name(),
                    error = %error,
                    "deploy attempt abandoned"
                );
                self.metrics.record_deploy_attempt("timeout");
                TickOutcome::Failed {
                    stage: TickStage::Deploy,
                    message: error.to_string(),
                }
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    version = %target,
                    engine = self.engine.engine_name(),
                    error = %e,
                    "deploy attempt failed"
                );
                self.metrics.record_deploy_attempt("failure");
                TickOutcome::Failed {
                    stage: TickStage::Deploy,
                    message: e.to_string(),
                }
            }
            Ok(Ok(())) => {
                tracing::info!(version = %target, "successfully deployed zone application");
                self.metrics.record_deploy_attempt("success");
                TickOutcome::Deployed {
                    version: target.to_string(),
                }
            }
        }
    }
}
