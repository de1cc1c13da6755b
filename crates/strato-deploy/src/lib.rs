//! # strato-deploy
//!
//! Zone application deployment reconciler for the Strato platform.
//!
//! The zone application is a cluster-internal platform application (the
//! cluster-wide routing application) deployed like any tenant application
//! but owned by the platform. This crate implements the control loop that
//! keeps it at the right version:
//!
//! - **Convergence Detection**: A pure policy over a fleet snapshot that
//!   decides whether a deploy is warranted and at which version
//! - **Artifact Retrieval**: Canonical bundle naming and a single-attempt
//!   HTTP fetcher
//! - **Deploy Capability**: A one-method engine abstraction with an HTTP
//!   implementation and an in-memory test double
//! - **Reconciliation Tick**: decide → fetch → deploy, with every failure
//!   contained to the tick that produced it
//!
//! ## Guarantees
//!
//! - **Deterministic**: The same fleet snapshot always produces the same
//!   decision, regardless of node iteration order
//! - **Tick-local failure**: A failed fetch or deploy aborts the tick,
//!   never the process; the next tick re-evaluates from scratch
//! - **Bounded deploys**: Each deploy attempt carries a timeout budget and
//!   is abandoned on expiry
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use strato_core::ZoneIdentity;
//! use strato_deploy::artifact::ArtifactFetcher;
//! use strato_deploy::budget::SystemClock;
//! use strato_deploy::engine::memory::InMemoryDeployEngine;
//! use strato_deploy::fleet::memory::InMemoryFleet;
//! use strato_deploy::reconciler::{ReconcilerConfig, ZoneReconciler};
//!
//! # async fn run() -> strato_deploy::error::Result<()> {
//! let zone = ZoneIdentity::new("main", "us-east-1", "prod")?;
//! let config = ReconcilerConfig::new(zone, "https://artifacts.example.com/zone-apps/");
//! let fetcher = ArtifactFetcher::new(config.artifact_base_url.clone())?;
//!
//! let reconciler = ZoneReconciler::new(
//!     config,
//!     Arc::new(InMemoryFleet::new()),
//!     fetcher,
//!     Arc::new(InMemoryDeployEngine::new()),
//!     Arc::new(SystemClock),
//! );
//!
//! let summary = reconciler.run_tick().await;
//! println!("tick outcome: {:?}", summary.outcome);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod artifact;
pub mod budget;
pub mod convergence;
pub mod engine;
pub mod error;
pub mod fleet;
pub mod metrics;
pub mod reconciler;

pub use convergence::{ConvergenceDetector, DeployDecision};
pub use error::{Error, Result};
pub use reconciler::{ReconcilerConfig, TickOutcome, TickSummary, ZoneReconciler};
