//! Update flow orchestration
//!
//! Wires the version resolver, release client, comparator, selector and
//! replacer together. User confirmation sits between [`GittyUpdater::check`]
//! and [`GittyUpdater::apply`] and belongs to the caller.

use gitty_core::RuntimeConfig;
use tracing::{debug, info};

use crate::compare::is_newer_by;
use crate::download::ArtifactDownloader;
use crate::error::{Result, UpdateError};
use crate::platform::Platform;
use crate::releases::{Artifact, ReleaseClient, ReleaseInfo};
use crate::replace::{FileOps, SelfReplacer, SwapReport};
use crate::select::select_artifact;
use crate::version::{current_version, VersionIdentifier};

/// Result of comparing the running build with the latest release
#[derive(Debug, Clone)]
pub struct UpdateCheck {
    /// Running version
    pub current: VersionIdentifier,

    /// Latest published release
    pub release: ReleaseInfo,

    /// Whether the release supersedes the running version
    pub newer: bool,
}

/// Self-update manager for the gitty CLI
pub struct GittyUpdater {
    config: RuntimeConfig,
    platform: Platform,
    current: VersionIdentifier,
    client: ReleaseClient,
    downloader: ArtifactDownloader,
}

impl GittyUpdater {
    /// Create an updater for `platform` using the running build's version
    pub fn new(config: RuntimeConfig, platform: Platform) -> Result<Self> {
        let client = ReleaseClient::new(&config.network)?;
        let downloader =
            ArtifactDownloader::new(&config.network)?.with_progress(config.update.show_progress);
        let current = current_version();

        debug!(
            "Updater initialized: version={}, platform={}, index={}",
            current, platform, config.release.index_url
        );

        Ok(Self {
            config,
            platform,
            current,
            client,
            downloader,
        })
    }

    /// Override the version treated as running
    pub fn with_current_version(mut self, version: impl Into<VersionIdentifier>) -> Self {
        self.current = version.into();
        self
    }

    pub fn current_version(&self) -> &VersionIdentifier {
        &self.current
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Fetch the latest release and compare it with the running version
    pub async fn check(&self) -> Result<UpdateCheck> {
        let release = self
            .client
            .fetch_latest_release(&self.config.release.index_url)
            .await?;

        let newer = is_newer_by(
            self.config.update.version_ordering,
            &self.current,
            &release.tag,
        );

        if newer {
            info!("Update available: {} -> {}", self.current, release.tag);
        } else {
            debug!("Already on latest version: {}", self.current);
        }

        Ok(UpdateCheck {
            current: self.current.clone(),
            release,
            newer,
        })
    }

    /// Pick the artifact for this updater's platform
    pub fn select<'a>(&self, release: &'a ReleaseInfo) -> Result<&'a Artifact> {
        select_artifact(release, &self.platform).ok_or_else(|| UpdateError::NoCompatibleArtifact {
            os: self.platform.os.clone(),
            arch: self.platform.arch.clone(),
        })
    }

    /// Replace the running executable with `artifact`
    pub async fn apply(&self, artifact: &Artifact) -> Result<SwapReport> {
        let replacer = SelfReplacer::for_current_exe()?;
        self.apply_to(&replacer, artifact).await
    }

    /// Replace the executable managed by `replacer` with `artifact`
    pub async fn apply_to<F: FileOps>(
        &self,
        replacer: &SelfReplacer<F>,
        artifact: &Artifact,
    ) -> Result<SwapReport> {
        replacer.replace_self(&self.downloader, artifact).await
    }
}
