//! Runtime configuration types for operational parameters
//!
//! These types control network timeouts, where release metadata is fetched
//! from, and how the self-update flow behaves.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// Release index settings
    #[serde(default)]
    pub release: ReleaseConfig,

    /// Self-update behaviour
    #[serde(default)]
    pub update: UpdateConfig,
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// Timeout for release index requests in seconds
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Timeout for artifact downloads in seconds
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout(),
            download_timeout_secs: default_download_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_http_timeout() -> u64 {
    30
}
fn default_download_timeout() -> u64 {
    300 // 5 minutes
}
fn default_user_agent() -> String {
    format!(
        "gitty/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Where the latest published release is described
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseConfig {
    /// Endpoint returning the latest release document
    #[serde(default = "default_index_url")]
    pub index_url: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            index_url: default_index_url(),
        }
    }
}

fn default_index_url() -> String {
    "https://api.github.com/repos/Sunchiii/gitty/releases/latest".to_string()
}

/// Self-update behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateConfig {
    /// How release tags are ordered against the running version
    #[serde(default)]
    pub version_ordering: VersionOrdering,

    /// Show a progress bar while downloading
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            version_ordering: VersionOrdering::default(),
            show_progress: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Ordering used to decide whether a release tag supersedes the running version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionOrdering {
    /// Plain string comparison of the tags
    #[default]
    Lexicographic,

    /// Semantic version comparison, degrading to string comparison for
    /// tags that are not semver
    Semantic,
}

impl fmt::Display for VersionOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexicographic => write!(f, "lexicographic"),
            Self::Semantic => write!(f, "semantic"),
        }
    }
}

impl FromStr for VersionOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexicographic" => Ok(Self::Lexicographic),
            "semantic" | "semver" => Ok(Self::Semantic),
            other => Err(format!(
                "unknown version ordering '{}', expected 'lexicographic' or 'semantic'",
                other
            )),
        }
    }
}
