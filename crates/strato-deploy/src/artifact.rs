//! Zone application bundle naming and retrieval.
//!
//! Bundles live under a configured base location with a canonical layout:
//! `<base><version>/<file-name>`, where the file name embeds version,
//! system, region, and environment in a fixed order. The naming functions
//! are pure; the fetcher makes a single HTTP attempt per invocation and
//! reports failure rather than retrying. The next scheduled tick is the
//! retry.

use std::time::Duration;

use bytes::Bytes;

use strato_core::{Version, ZoneIdentity};

use crate::error::{Error, Result};

/// Content type bundle responses must carry.
const BUNDLE_CONTENT_TYPE: &str = "application/zip";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Returns the canonical bundle file name for a version/zone pair.
///
/// The format is fixed and must never drift: downstream tooling publishes
/// bundles under exactly this name.
#[must_use]
pub fn bundle_file_name(version: &Version, zone: &ZoneIdentity) -> String {
    format!(
        "zone-application-{version}-{}_{}_{}.zip",
        zone.system(),
        zone.region(),
        zone.environment()
    )
}

/// Resolves the bundle URL for a version/zone pair against a base location.
///
/// The layout is `<base><version>/<file-name>`; `base` is expected to end
/// with `/`.
#[must_use]
pub fn bundle_url(base: &str, version: &Version, zone: &ZoneIdentity) -> String {
    format!("{base}{version}/{}", bundle_file_name(version, zone))
}

/// A retrieved, compressed application bundle.
#[derive(Debug, Clone)]
pub struct ApplicationBundle {
    version: Version,
    url: String,
    bytes: Bytes,
}

impl ApplicationBundle {
    /// Creates a bundle from raw parts.
    ///
    /// Intended for tests and for fetcher implementations.
    #[must_use]
    pub fn new(version: Version, url: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            version,
            url: url.into(),
            bytes,
        }
    }

    /// Returns the version this bundle was built for.
    #[must_use]
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Returns the URL the bundle was retrieved from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the compressed bundle payload.
    #[must_use]
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Returns the payload size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fetches zone application bundles over HTTP.
#[derive(Debug, Clone)]
pub struct ArtifactFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl ArtifactFetcher {
    /// Creates a fetcher resolving bundles against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Returns the configured base location.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retrieves the bundle for `version` in `zone`.
    ///
    /// One attempt per invocation; no internal retry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] if the request fails, the server responds
    /// with a non-success status, the content type is not
    /// `application/zip`, or the body cannot be read.
    pub async fn fetch(&self, zone: &ZoneIdentity, version: &Version) -> Result<ApplicationBundle> {
        let url = bundle_url(&self.base_url, version, zone);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::fetch(&url, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(&url, format!("unexpected status {status}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with(BUNDLE_CONTENT_TYPE) {
            return Err(Error::fetch(
                &url,
                format!("unexpected content type '{content_type}'"),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::fetch(&url, format!("failed to read body: {e}")))?;

        tracing::debug!(url = %url, size = bytes.len(), "fetched zone application bundle");

        Ok(ApplicationBundle::new(version.clone(), url, bytes))
    }
}
