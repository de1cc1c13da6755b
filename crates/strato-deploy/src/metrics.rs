//! Observability metrics for the deployment reconciler.
//!
//! Metrics are exposed via the `metrics` crate facade.
//!
//! ## Metrics Exported
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `strato_deploy_ticks_total` | Counter | `outcome` | Reconciliation tick outcomes |
//! | `strato_deploy_tick_duration_seconds` | Histogram | - | Tick processing time |
//! | `strato_deploy_attempts_total` | Counter | `result` | Deploy attempts by result |

use std::time::Duration;

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    /// Counter: Reconciliation tick outcomes.
    pub const TICKS_TOTAL: &str = "strato_deploy_ticks_total";
    /// Histogram: Tick processing time in seconds.
    pub const TICK_DURATION_SECONDS: &str = "strato_deploy_tick_duration_seconds";
    /// Counter: Deploy attempts by result.
    pub const DEPLOY_ATTEMPTS_TOTAL: &str = "strato_deploy_attempts_total";
}

/// Label keys used across metrics.
pub mod labels {
    /// Tick outcome (`no_action`, `deployed`, `failed`).
    pub const OUTCOME: &str = "outcome";
    /// Deploy attempt result (`success`, `failure`, `timeout`).
    pub const RESULT: &str = "result";
}

/// High-level interface for recording reconciler metrics.
///
/// Cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct DeployMetrics;

impl DeployMetrics {
    /// Creates a new metrics recorder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Records the outcome of one reconciliation tick.
    pub fn record_tick(&self, outcome: &str) {
        counter!(
            names::TICKS_TOTAL,
            labels::OUTCOME => outcome.to_string(),
        )
        .increment(1);
    }

    /// Records tick processing time.
    pub fn observe_tick_duration(&self, duration: Duration) {
        histogram!(names::TICK_DURATION_SECONDS).record(duration.as_secs_f64());
    }

    /// Records one deploy attempt.
    pub fn record_deploy_attempt(&self, result: &str) {
        counter!(
            names::DEPLOY_ATTEMPTS_TOTAL,
            labels::RESULT => result.to_string(),
        )
        .increment(1);
    }
}
