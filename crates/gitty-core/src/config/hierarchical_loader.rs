//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Runtime config (~/.gitty/gitty-runtime.yaml)
//! 3. Environment variables (GITTY_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::RuntimeConfig;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// Name of the user-level runtime configuration file
const RUNTIME_CONFIG_FILE: &str = "gitty-runtime.yaml";

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a new hierarchical config loader rooted at ~/.gitty
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the standard config directory (~/.gitty)
    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .map_err(|_| Error::invalid_config("Could not determine home directory"))?;

        Ok(Utf8PathBuf::from(home).join(".gitty"))
    }

    /// Load runtime configuration with hierarchical precedence
    pub fn load_runtime_config(&self) -> Result<RuntimeConfig> {
        // Start with embedded defaults
        let mut config = Self::load_embedded_config::<RuntimeConfig>("runtime-defaults.yaml")?;

        let runtime_config_path = self.config_dir.join(RUNTIME_CONFIG_FILE);
        if runtime_config_path.exists() {
            debug!("Loading runtime config from {}", runtime_config_path);
            let file_config = self.load_yaml_file::<RuntimeConfig>(&runtime_config_path)?;
            config = Self::merge_runtime_config(config, file_config);
        }

        config = Self::apply_env_overrides(config)?;

        Ok(config)
    }

    /// Load an embedded configuration file
    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })
    }

    /// Load a YAML file and parse it
    fn load_yaml_file<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Merge two runtime configs (base is overridden by overlay)
    fn merge_runtime_config(_base: RuntimeConfig, overlay: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            network: overlay.network,
            release: overlay.release,
            update: overlay.update,
        }
    }

    /// Apply environment variable overrides to runtime config
    fn apply_env_overrides(mut config: RuntimeConfig) -> Result<RuntimeConfig> {
        if let Ok(val) = env::var("GITTY_RELEASE_INDEX_URL") {
            config.release.index_url = val;
        }

        if let Ok(val) = env::var("GITTY_HTTP_TIMEOUT_SECS") {
            config.network.http_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("GITTY_HTTP_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("GITTY_DOWNLOAD_TIMEOUT_SECS") {
            config.network.download_timeout_secs = val.parse().map_err(|_| {
                Error::invalid_config("GITTY_DOWNLOAD_TIMEOUT_SECS must be a valid number")
            })?;
        }

        if let Ok(val) = env::var("GITTY_VERSION_ORDERING") {
            config.update.version_ordering = val.parse().map_err(Error::invalid_config)?;
        }

        if let Ok(val) = env::var("GITTY_NO_PROGRESS") {
            config.update.show_progress = !parse_env_flag(&val).ok_or_else(|| {
                Error::invalid_config("GITTY_NO_PROGRESS must be true/false, 1/0 or yes/no")
            })?;
        }

        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

/// Parse a boolean environment flag
fn parse_env_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
