//! Release index client

use gitty_core::types::NetworkConfig;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{Result, UpdateError};
use crate::version::VersionIdentifier;

/// Snapshot of the latest published release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Release tag (e.g., "v1.3.0")
    #[serde(rename = "tag_name")]
    pub tag: VersionIdentifier,

    /// Release notes
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,

    /// Publish timestamp as reported by the index
    #[serde(default)]
    pub published_at: Option<String>,

    /// Downloadable artifacts, in index order
    #[serde(rename = "assets", default, deserialize_with = "null_as_default")]
    pub artifacts: Vec<Artifact>,
}

/// A downloadable release asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Asset name, carrying platform and architecture tokens
    pub name: String,

    /// Download URL
    #[serde(rename = "browser_download_url")]
    pub url: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ReleaseInfo {
    /// Decode a release document
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Publish date (YYYY-MM-DD) when the timestamp is long enough to carry one
    pub fn published_date(&self) -> Option<&str> {
        self.published_at
            .as_deref()
            .and_then(|timestamp| timestamp.get(..10))
    }
}

/// Client for the release index
pub struct ReleaseClient {
    client: reqwest::Client,
}

impl ReleaseClient {
    /// Create a client honouring the configured user agent and timeout
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(Duration::from_secs(network.http_timeout_secs))
            .build()
            .map_err(|e| UpdateError::network("Failed to create HTTP client", e))?;

        Ok(Self { client })
    }

    /// Fetch the latest release from `index_url`
    ///
    /// Issues a single request without retrying. The response body is read to
    /// the end before decoding so the connection is returned to the pool
    /// whether or not the payload decodes.
    pub async fn fetch_latest_release(&self, index_url: &str) -> Result<ReleaseInfo> {
        debug!("Fetching latest release from: {}", index_url);

        let response = self
            .client
            .get(index_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| UpdateError::network("Failed to reach release index", e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| UpdateError::network("Failed to read release index response", e))?;

        if !status.is_success() {
            return Err(UpdateError::network_msg(format!(
                "Release index returned {}",
                status
            )));
        }

        let release = ReleaseInfo::from_slice(&body)?;
        info!(
            "Latest release {} with {} artifacts",
            release.tag,
            release.artifacts.len()
        );
        Ok(release)
    }
}
