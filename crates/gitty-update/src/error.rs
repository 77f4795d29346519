//! Error taxonomy for the update flow
//!
//! Network, decode and selection failures are raised before the filesystem
//! is touched. Filesystem failures are raised only after the executable path
//! holds a runnable binary again, except for [`UpdateError::RollbackFailed`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for update operations
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Errors raised by the self-update subsystem
#[derive(Error, Debug)]
pub enum UpdateError {
    /// Release index or artifact request failed
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Release metadata was not well-formed
    #[error("Malformed release metadata: {0}")]
    Decode(#[from] serde_json::Error),

    /// No artifact in the release matches the running platform
    #[error("No compatible release found for {os}/{arch}")]
    NoCompatibleArtifact { os: String, arch: String },

    /// A temp-file, permission or rename step failed; the executable is intact
    #[error("Failed to {action} {}: {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Restoring the backup after a failed swap also failed
    #[error(
        "Failed to restore the previous executable from {}: {source}. Move it back manually.",
        backup.display()
    )]
    RollbackFailed {
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] gitty_core::Error),
}

impl UpdateError {
    /// Create a network error from a transport failure
    pub fn network(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a network error that has no underlying transport error
    pub fn network_msg(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a filesystem error
    pub fn filesystem(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Stable short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Decode(_) => "decode",
            Self::NoCompatibleArtifact { .. } => "no-compatible-artifact",
            Self::Filesystem { .. } => "filesystem",
            Self::RollbackFailed { .. } => "rollback-failed",
            Self::Config(_) => "config",
        }
    }
}
