//! Artifact fetcher tests against a live HTTP server.

#![allow(clippy::expect_used)]

use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;

use strato_core::{Version, ZoneIdentity};
use strato_deploy::artifact::ArtifactFetcher;
use strato_deploy::error::Error;

const BUNDLE_PAYLOAD: &[u8] = b"PK\x03\x04zone-application";

#[derive(Clone, Copy)]
enum ServerMode {
    ServeBundle,
    NotFound,
    WrongContentType,
}

#[derive(Clone)]
struct ServerState {
    mode: ServerMode,
    seen_paths: Arc<Mutex<Vec<String>>>,
}

async fn bundle_handler(State(state): State<ServerState>, uri: Uri) -> Response {
    state
        .seen_paths
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(uri.path().to_string());

    match state.mode {
        ServerMode::ServeBundle => (
            [(header::CONTENT_TYPE, "application/zip")],
            BUNDLE_PAYLOAD,
        )
            .into_response(),
        ServerMode::NotFound => StatusCode::NOT_FOUND.into_response(),
        ServerMode::WrongContentType => (
            [(header::CONTENT_TYPE, "text/html")],
            "<html>not a bundle</html>",
        )
            .into_response(),
    }
}

async fn start_test_server(
    mode: ServerMode,
) -> (String, Arc<Mutex<Vec<String>>>, tokio::task::JoinHandle<()>) {
    let seen_paths = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback(bundle_handler).with_state(ServerState {
        mode,
        seen_paths: seen_paths.clone(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("listener addr");
    let base_url = format!("http://{addr}/zone-apps/");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test server");
    });

    (base_url, seen_paths, handle)
}

fn test_zone() -> ZoneIdentity {
    ZoneIdentity::new("main", "us-east-1", "prod").expect("valid zone")
}

#[tokio::test]
async fn fetch_resolves_the_canonical_bundle_path() {
    let (base_url, seen_paths, _handle) = start_test_server(ServerMode::ServeBundle).await;
    let fetcher = ArtifactFetcher::new(&base_url).expect("build fetcher");

    let bundle = fetcher
        .fetch(&test_zone(), &Version::new(7, 1, 0))
        .await
        .expect("fetch bundle");

    assert_eq!(bundle.version(), &Version::new(7, 1, 0));
    assert_eq!(bundle.bytes().as_ref(), BUNDLE_PAYLOAD);

    let paths = seen_paths.lock().unwrap_or_else(PoisonError::into_inner);
    assert_eq!(
        paths.as_slice(),
        ["/zone-apps/7.1.0/zone-application-7.1.0-main_us-east-1_prod.zip"]
    );
}

#[tokio::test]
async fn missing_bundle_surfaces_a_fetch_error() {
    let (base_url, _seen_paths, _handle) = start_test_server(ServerMode::NotFound).await;
    let fetcher = ArtifactFetcher::new(&base_url).expect("build fetcher");

    let result = fetcher.fetch(&test_zone(), &Version::new(7, 1, 0)).await;

    match result {
        Err(Error::Fetch { url, message }) => {
            assert!(url.contains("7.1.0"));
            assert!(message.contains("unexpected status"));
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn wrong_content_type_is_rejected() {
    let (base_url, _seen_paths, _handle) = start_test_server(ServerMode::WrongContentType).await;
    let fetcher = ArtifactFetcher::new(&base_url).expect("build fetcher");

    let result = fetcher.fetch(&test_zone(), &Version::new(7, 1, 0)).await;

    match result {
        Err(Error::Fetch { message, .. }) => {
            assert!(message.contains("unexpected content type"));
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_surfaces_a_fetch_error() {
    // Nothing listens on this port.
    let fetcher = ArtifactFetcher::new("http://127.0.0.1:1/zone-apps/").expect("build fetcher");

    let result = fetcher.fetch(&test_zone(), &Version::new(7, 1, 0)).await;
    assert!(matches!(result, Err(Error::Fetch { .. })));
}
