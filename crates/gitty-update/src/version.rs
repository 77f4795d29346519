//! Version information for the running build

use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compiled-in version used when no embedded version token is available
pub const FALLBACK_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Name of the embedded version resource
const VERSION_RESOURCE: &str = "version.txt";

/// Resources compiled into the binary
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/resources/"]
struct EmbeddedResources;

/// Opaque version token identifying a build, such as a release tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionIdentifier(String);

impl VersionIdentifier {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VersionIdentifier {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for VersionIdentifier {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Resolve a version token from embedded resource content
///
/// Missing, non-UTF-8 or blank content yields [`FALLBACK_VERSION`].
pub fn resolve_version(embedded: Option<&[u8]>) -> VersionIdentifier {
    embedded
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(VersionIdentifier::from)
        .unwrap_or_else(|| VersionIdentifier::from(FALLBACK_VERSION))
}

/// Version of the running build
pub fn current_version() -> VersionIdentifier {
    let resource = EmbeddedResources::get(VERSION_RESOURCE);
    resolve_version(resource.as_ref().map(|file| file.data.as_ref()))
}

/// Version and build information for the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Version token
    pub version: VersionIdentifier,

    /// Git commit SHA (short)
    pub commit: Option<String>,

    /// Build date
    pub build_date: Option<String>,

    /// Platform as os/arch
    pub platform: String,
}

impl VersionInfo {
    /// Create version info for the current build
    ///
    /// `commit` and `build_date` are supplied by the binary's build script.
    pub fn current(commit: Option<&str>, build_date: Option<&str>) -> Self {
        let platform = crate::platform::Platform::current();
        Self {
            version: current_version(),
            commit: commit.map(String::from),
            build_date: build_date.map(String::from),
            platform: platform.to_string(),
        }
    }

    /// Format as display string
    pub fn display(&self) -> String {
        let mut parts = vec![format!("gitty {}", self.version)];

        if let Some(commit) = &self.commit {
            parts.push(format!("({})", commit));
        }

        parts.push(self.platform.clone());
        parts.join(" ")
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_version_trims_embedded_token() {
        let version = resolve_version(Some(b"  v1.2.0\n"));
        assert_eq!(version.as_str(), "v1.2.0");
    }

    #[test]
    fn test_resolve_version_missing_resource_falls_back() {
        assert_eq!(resolve_version(None).as_str(), FALLBACK_VERSION);
    }

    #[test]
    fn test_resolve_version_blank_resource_falls_back() {
        assert_eq!(resolve_version(Some(b" \n\t")).as_str(), FALLBACK_VERSION);
    }

    #[test]
    fn test_resolve_version_invalid_utf8_falls_back() {
        assert_eq!(
            resolve_version(Some(&[0xff, 0xfe, 0x00])).as_str(),
            FALLBACK_VERSION
        );
    }

    #[test]
    fn test_current_version_is_non_empty() {
        assert!(!current_version().as_str().is_empty());
    }

    #[test]
    fn test_fallback_version_tracks_package_version() {
        assert_eq!(
            FALLBACK_VERSION,
            format!("v{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_version_info_display_with_all_fields() {
        let info = VersionInfo {
            version: VersionIdentifier::from("v1.2.3"),
            commit: Some("abc1234".to_string()),
            build_date: Some("2026-01-01".to_string()),
            platform: "linux/amd64".to_string(),
        };
        assert_eq!(info.display(), "gitty v1.2.3 (abc1234) linux/amd64");
        assert_eq!(format!("{}", info), info.display());
    }

    #[test]
    fn test_version_info_json_serialization() {
        let info = VersionInfo::current(Some("abc1234"), None);
        let json = serde_json::to_string(&info).expect("should serialize to JSON");
        assert!(json.contains(&format!("\"version\":\"{}\"", info.version)));

        let deserialized: VersionInfo =
            serde_json::from_str(&json).expect("should deserialize from JSON");
        assert_eq!(deserialized.version, info.version);
        assert_eq!(deserialized.commit.as_deref(), Some("abc1234"));
    }
}
