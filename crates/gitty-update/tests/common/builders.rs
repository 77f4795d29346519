//! Builders for release documents and runtime configuration

use gitty_core::RuntimeConfig;
use serde_json::{json, Value};

use super::constants::*;

/// Builder for GitHub-style release JSON documents
#[derive(Debug, Clone)]
pub struct ReleaseJsonBuilder {
    tag_name: String,
    body: Option<String>,
    published_at: Option<String>,
    assets: Vec<Value>,
}

impl ReleaseJsonBuilder {
    pub fn new() -> Self {
        Self {
            tag_name: TAG_V1_3_0.to_string(),
            body: Some(RELEASE_NOTES.to_string()),
            published_at: Some("2026-03-14T09:30:00Z".to_string()),
            assets: Vec::new(),
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag_name = tag.to_string();
        self
    }

    pub fn asset(mut self, name: &str, url: &str) -> Self {
        self.assets.push(json!({
            "name": name,
            "size": 1024,
            "content_type": "application/octet-stream",
            "browser_download_url": url,
        }));
        self
    }

    /// The darwin/arm64 and linux/amd64 pair, served from `base_url`
    pub fn with_standard_assets(self, base_url: &str) -> Self {
        self.asset(
            ARTIFACT_DARWIN_ARM64,
            &format!("{}/download/{}", base_url, ARTIFACT_DARWIN_ARM64),
        )
        .asset(
            ARTIFACT_LINUX_AMD64,
            &format!("{}/download/{}", base_url, ARTIFACT_LINUX_AMD64),
        )
    }

    pub fn build(self) -> Value {
        json!({
            "tag_name": self.tag_name,
            "name": format!("gitty {}", self.tag_name),
            "draft": false,
            "prerelease": false,
            "body": self.body,
            "published_at": self.published_at,
            "assets": self.assets,
        })
    }
}

impl Default for ReleaseJsonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runtime config pointing at a mock release index, without progress bars
pub fn test_config(base_url: &str) -> RuntimeConfig {
    let mut config = RuntimeConfig::default();
    config.release.index_url = format!("{}{}", base_url, INDEX_PATH);
    config.network.http_timeout_secs = 5;
    config.network.download_timeout_secs = 5;
    config.update.show_progress = false;
    config
}
