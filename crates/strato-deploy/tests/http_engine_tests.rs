//! HTTP deployment engine tests against a live HTTP server.

#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;

use strato_core::Version;
use strato_deploy::artifact::ApplicationBundle;
use strato_deploy::budget::{Clock, ManualClock, SystemClock, TimeoutBudget};
use strato_deploy::engine::http::HttpDeployEngine;
use strato_deploy::engine::{ApplicationId, DeployEngine, DeployParams};
use strato_deploy::error::Error;

const BUNDLE_PAYLOAD: &[u8] = b"PK\x03\x04zone-application";

#[derive(Debug, Clone, Default)]
struct SeenRequest {
    query: HashMap<String, String>,
    content_type: Option<String>,
    authorization: Option<String>,
    body_len: usize,
}

#[derive(Clone, Copy)]
enum ServerMode {
    Accept,
    Reject,
}

#[derive(Clone)]
struct ServerState {
    mode: ServerMode,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

async fn deploy_handler(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let header_value = |name: axum::http::header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string)
    };

    state
        .seen
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(SeenRequest {
            query,
            content_type: header_value(axum::http::header::CONTENT_TYPE),
            authorization: header_value(axum::http::header::AUTHORIZATION),
            body_len: body.len(),
        });

    match state.mode {
        ServerMode::Accept => (StatusCode::OK, "deployed"),
        ServerMode::Reject => (StatusCode::BAD_REQUEST, "invalid bundle"),
    }
}

async fn start_test_server(
    mode: ServerMode,
) -> (String, Arc<Mutex<Vec<SeenRequest>>>, tokio::task::JoinHandle<()>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/deploy", post(deploy_handler))
        .with_state(ServerState {
            mode,
            seen: seen.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("listener addr");
    let endpoint = format!("http://{addr}/deploy");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test server");
    });

    (endpoint, seen, handle)
}

fn test_bundle() -> ApplicationBundle {
    ApplicationBundle::new(
        Version::new(7, 1, 0),
        "https://artifacts.example.com/7.1.0/app.zip",
        axum::body::Bytes::from_static(BUNDLE_PAYLOAD),
    )
}

fn fresh_params(clock: &dyn Clock) -> DeployParams {
    DeployParams::new(
        ApplicationId::zone_application(),
        Version::new(7, 1, 0),
        TimeoutBudget::new(clock, chrono::Duration::seconds(60)),
    )
}

#[tokio::test]
async fn deploy_posts_bundle_with_identity_and_version() {
    let (endpoint, seen, _handle) = start_test_server(ServerMode::Accept).await;
    let clock = Arc::new(SystemClock);
    let engine = HttpDeployEngine::new(&endpoint, clock.clone())
        .expect("build engine")
        .with_bearer_token("test-token");

    engine
        .deploy(&test_bundle(), &fresh_params(clock.as_ref()))
        .await
        .expect("deploy");

    let seen = seen.lock().unwrap_or_else(PoisonError::into_inner);
    assert_eq!(seen.len(), 1);
    assert_eq!(
        seen[0].query.get("application").map(String::as_str),
        Some("platform:routing:default")
    );
    assert_eq!(seen[0].query.get("version").map(String::as_str), Some("7.1.0"));
    assert_eq!(
        seen[0].content_type.as_deref(),
        Some("application/zip")
    );
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer test-token"));
    assert_eq!(seen[0].body_len, BUNDLE_PAYLOAD.len());
}

#[tokio::test]
async fn rejected_deploy_surfaces_engine_response() {
    let (endpoint, _seen, _handle) = start_test_server(ServerMode::Reject).await;
    let clock = Arc::new(SystemClock);
    let engine = HttpDeployEngine::new(&endpoint, clock.clone()).expect("build engine");

    let result = engine
        .deploy(&test_bundle(), &fresh_params(clock.as_ref()))
        .await;

    match result {
        Err(Error::Deploy { message }) => {
            assert!(message.contains("400"));
            assert!(message.contains("invalid bundle"));
        }
        other => panic!("expected deploy error, got {other:?}"),
    }
}

#[tokio::test]
async fn expired_budget_fails_without_waiting() {
    let (endpoint, seen, _handle) = start_test_server(ServerMode::Accept).await;
    // The budget was minted long ago; its deadline has already passed by
    // the engine's (system) clock.
    let stale_clock = ManualClock::new(chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap());
    let engine = HttpDeployEngine::new(&endpoint, Arc::new(SystemClock)).expect("build engine");

    let result = engine
        .deploy(&test_bundle(), &fresh_params(&stale_clock))
        .await;

    assert!(matches!(result, Err(Error::Deploy { .. })));
    assert!(seen.lock().unwrap_or_else(PoisonError::into_inner).is_empty());
}
