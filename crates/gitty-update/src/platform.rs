//! Platform identification for artifact matching
//!
//! Release artifacts are named with Go-style tokens (`linux`, `darwin`,
//! `amd64`, `arm64`). Rust's target identifiers are mapped onto them.

use std::fmt;

/// Operating system and CPU architecture tokens
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    /// Operating system token, e.g. "linux"
    pub os: String,

    /// Architecture token, e.g. "amd64"
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Platform of the running process
    pub fn current() -> Self {
        Self::from_rust_target(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Map Rust `target_os`/`target_arch` values to release tokens
    pub fn from_rust_target(os: &str, arch: &str) -> Self {
        let os = match os {
            "macos" => "darwin",
            other => other,
        };
        let arch = match arch {
            "x86_64" => "amd64",
            "aarch64" => "arm64",
            "x86" => "386",
            other => other,
        };
        Self::new(os, arch)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}
