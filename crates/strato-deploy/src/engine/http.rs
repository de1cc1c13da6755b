//! HTTP deployment engine.
//!
//! Deploys are issued as a single `POST` of the compressed bundle to the
//! deployment engine's endpoint. The engine is expected to be idempotent
//! per version: redeploying the version it already runs should be a no-op
//! on its side.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{DeployEngine, DeployParams};
use crate::artifact::ApplicationBundle;
use crate::budget::Clock;
use crate::error::{Error, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Deployment engine that POSTs bundles to a remote deploy endpoint.
pub struct HttpDeployEngine {
    endpoint: String,
    bearer_token: Option<String>,
    client: reqwest::Client,
    clock: Arc<dyn Clock>,
}

impl HttpDeployEngine {
    /// Creates an engine posting to `endpoint`.
    ///
    /// The clock is used to derive each request's timeout from the deploy
    /// attempt's remaining budget.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, clock: Arc<dyn Clock>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            bearer_token: None,
            client,
            clock,
        })
    }

    /// Attaches a static bearer token to every deploy request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}

#[async_trait]
impl DeployEngine for HttpDeployEngine {
    async fn deploy(&self, bundle: &ApplicationBundle, params: &DeployParams) -> Result<()> {
        let remaining = params
            .budget()
            .remaining(self.clock.as_ref())
            .to_std()
            .unwrap_or_default();

        let mut request = self
            .client
            .post(&self.endpoint)
            .timeout(remaining)
            .query(&[
                ("application", params.application_id().to_string()),
                ("version", params.version().to_string()),
            ])
            .header(reqwest::header::CONTENT_TYPE, "application/zip")
            .body(bundle.bytes().clone());

        if let Some(token) = self.bearer_token.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::deploy(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::deploy(format!(
                "engine responded with {status}: {body}"
            )));
        }

        tracing::debug!(
            endpoint = %self.endpoint,
            version = %params.version(),
            "deployment engine accepted bundle"
        );

        Ok(())
    }

    fn engine_name(&self) -> &str {
        "http"
    }
}
