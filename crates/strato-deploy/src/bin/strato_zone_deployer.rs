//! Strato zone application deployer service.
//!
//! Exposes one reconciliation tick per `POST /run`. The external scheduler
//! owns the interval, serializes invocations, and provides enable/disable
//! control; this service only executes ticks.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use strato_core::observability::{init_logging, LogFormat};
use strato_core::ZoneIdentity;
use strato_deploy::artifact::ArtifactFetcher;
use strato_deploy::budget::SystemClock;
use strato_deploy::engine::http::HttpDeployEngine;
use strato_deploy::error::{Error, Result};
use strato_deploy::fleet::http::HttpNodeSource;
use strato_deploy::reconciler::{ReconcilerConfig, TickSummary, ZoneReconciler};

#[derive(Clone)]
struct AppState {
    reconciler: Arc<ZoneReconciler>,
}

async fn health_handler() -> StatusCode {
    StatusCode::OK
}

async fn run_handler(State(state): State<AppState>) -> Json<TickSummary> {
    Json(state.reconciler.run_tick().await)
}

fn required_env(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| Error::configuration(format!("missing {key}")))
}

fn resolve_port() -> Result<u16> {
    if let Ok(port) = std::env::var("PORT") {
        return port
            .parse::<u16>()
            .map_err(|_| Error::configuration("invalid PORT"));
    }

    if let Ok(port) = std::env::var("STRATO_DEPLOY_PORT") {
        return port
            .parse::<u16>()
            .map_err(|_| Error::configuration("invalid STRATO_DEPLOY_PORT"));
    }

    Ok(8080)
}

fn log_format_from_env() -> LogFormat {
    match std::env::var("STRATO_LOG_FORMAT") {
        Ok(value) if value.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}

fn resolve_deploy_timeout() -> Result<Option<chrono::Duration>> {
    match std::env::var("STRATO_DEPLOY_TIMEOUT_SECS") {
        Ok(value) => value
            .parse::<i64>()
            .map(|secs| Some(chrono::Duration::seconds(secs)))
            .map_err(|_| Error::configuration("invalid STRATO_DEPLOY_TIMEOUT_SECS")),
        Err(_) => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(log_format_from_env());

    let system = required_env("STRATO_ZONE_SYSTEM")?;
    let region = required_env("STRATO_ZONE_REGION")?;
    let environment = required_env("STRATO_ZONE_ENVIRONMENT")?;
    let zone = ZoneIdentity::new(system, region, environment)?;

    let artifact_base_url = required_env("STRATO_ARTIFACT_BASE_URL")?;
    let fleet_url = required_env("STRATO_FLEET_URL")?;
    let deploy_url = required_env("STRATO_DEPLOY_URL")?;
    let port = resolve_port()?;

    let mut config = ReconcilerConfig::new(zone, artifact_base_url.clone());
    if let Some(timeout) = resolve_deploy_timeout()? {
        config = config.with_deploy_timeout(timeout);
    }

    let clock = Arc::new(SystemClock);
    let mut engine = HttpDeployEngine::new(deploy_url, clock.clone())?;
    if let Ok(token) = std::env::var("STRATO_DEPLOY_TOKEN") {
        engine = engine.with_bearer_token(token);
    }

    let reconciler = ZoneReconciler::new(
        config,
        Arc::new(HttpNodeSource::new(fleet_url)?),
        ArtifactFetcher::new(artifact_base_url)?,
        Arc::new(engine),
        clock,
    );

    let state = AppState {
        reconciler: Arc::new(reconciler),
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/run", post(run_handler))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::configuration(format!("failed to bind: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::configuration(format!("server error: {e}")))
}
