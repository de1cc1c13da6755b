//! HTTP fleet store client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use strato_core::Node;

use super::NodeSource;
use crate::error::{Error, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire shape of the fleet store's node list response.
#[derive(Debug, Deserialize)]
struct NodeListResponse {
    nodes: Vec<Node>,
}

/// Fleet source backed by an HTTP node store.
///
/// Issues one `GET` per tick against the configured endpoint and expects a
/// JSON body of the form `{"nodes": [...]}`.
#[derive(Debug, Clone)]
pub struct HttpNodeSource {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpNodeSource {
    /// Creates a source reading from `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

#[async_trait]
impl NodeSource for HttpNodeSource {
    async fn list_nodes(&self) -> Result<Vec<Node>> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| Error::fleet_with_source("request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fleet(format!("unexpected status {status}")));
        }

        let body: NodeListResponse = response
            .json()
            .await
            .map_err(|e| Error::fleet_with_source("failed to decode node list", e))?;

        Ok(body.nodes)
    }
}
