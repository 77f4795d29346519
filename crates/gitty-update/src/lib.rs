//! Self-update functionality for the gitty CLI
//!
//! Provides:
//! - Resolution of the running build's version token
//! - Fetching the latest release from the release index
//! - Version ordering (lexicographic baseline, optional semver)
//! - Platform-matched artifact selection
//! - Artifact download into a process-exclusive temp file
//! - Backup-rename-rollback replacement of the running executable

pub mod compare;
pub mod download;
pub mod error;
pub mod platform;
pub mod releases;
pub mod replace;
pub mod select;
pub mod updater;
pub mod version;

pub use compare::{is_newer, is_newer_by};
pub use download::ArtifactDownloader;
pub use error::{Result, UpdateError};
pub use platform::Platform;
pub use releases::{Artifact, ReleaseClient, ReleaseInfo};
pub use replace::{FileOps, SelfReplacer, StdFileOps, SwapReport, SwapState};
pub use select::select_artifact;
pub use updater::{GittyUpdater, UpdateCheck};
pub use version::{current_version, resolve_version, VersionIdentifier, VersionInfo};
