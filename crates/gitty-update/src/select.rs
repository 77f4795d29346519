//! Artifact selection for the running platform

use tracing::debug;

use crate::platform::Platform;
use crate::releases::{Artifact, ReleaseInfo};

/// First artifact whose name contains both the OS and architecture tokens
///
/// Artifact order from the release index is authoritative, so the earliest
/// match wins. `None` means the release has no build for this platform.
pub fn select_artifact<'a>(release: &'a ReleaseInfo, platform: &Platform) -> Option<&'a Artifact> {
    let selected = release
        .artifacts
        .iter()
        .find(|a| a.name.contains(&platform.os) && a.name.contains(&platform.arch));

    match selected {
        Some(artifact) => debug!("Selected {} for {}", artifact.name, platform),
        None => debug!(
            "No artifact for {} among {} candidates",
            platform,
            release.artifacts.len()
        ),
    }

    selected
}
