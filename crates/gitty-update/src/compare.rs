//! Version ordering
//!
//! The baseline ordering is plain string comparison of the two tokens. It is
//! correct for tags whose numeric components share a digit width ("v1.2.0" vs
//! "v1.3.0") and wrong for unpadded components: "v10" sorts before "v9".
//! [`VersionOrdering::Semantic`] fixes that for tags that parse as semver and
//! otherwise keeps the string ordering.

use gitty_core::types::VersionOrdering;
use semver::Version;

use crate::version::VersionIdentifier;

/// Whether `candidate` supersedes `current` under lexicographic ordering
pub fn is_newer(current: &VersionIdentifier, candidate: &VersionIdentifier) -> bool {
    candidate.as_str() > current.as_str()
}

/// Whether `candidate` supersedes `current` under the given ordering
pub fn is_newer_by(
    ordering: VersionOrdering,
    current: &VersionIdentifier,
    candidate: &VersionIdentifier,
) -> bool {
    match ordering {
        VersionOrdering::Lexicographic => is_newer(current, candidate),
        VersionOrdering::Semantic => match (parse_semver(current), parse_semver(candidate)) {
            (Some(a), Some(b)) => b > a,
            _ => is_newer(current, candidate),
        },
    }
}

fn parse_semver(version: &VersionIdentifier) -> Option<Version> {
    let token = version.as_str();
    Version::parse(token.strip_prefix('v').unwrap_or(token)).ok()
}
