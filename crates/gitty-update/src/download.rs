//! Artifact download into a process-exclusive temp file
//!
//! The temp file is created next to the executable it will replace so the
//! final move is a same-filesystem rename. Any failure drops the
//! [`NamedTempFile`], which deletes it.

use bytes::Bytes;
use futures_util::StreamExt;
use gitty_core::types::NetworkConfig;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Result, UpdateError};
use crate::releases::Artifact;

/// Prefix for staged downloads
const STAGING_PREFIX: &str = ".gitty-update-";

/// Downloads release artifacts
pub struct ArtifactDownloader {
    /// HTTP client
    client: reqwest::Client,

    /// Enable progress bars
    show_progress: bool,
}

impl ArtifactDownloader {
    /// Create a downloader honouring the configured user agent and download timeout
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(Duration::from_secs(network.download_timeout_secs))
            .build()
            .map_err(|e| UpdateError::network("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            show_progress: true,
        })
    }

    /// Enable or disable progress bars
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Download `artifact` into a new temp file inside `dir`
    ///
    /// The returned file has been flushed and synced. An empty body or one
    /// shorter than the advertised `Content-Length` is rejected.
    pub async fn download(&self, artifact: &Artifact, dir: &Path) -> Result<NamedTempFile> {
        info!("Downloading {} from {}", artifact.name, artifact.url);

        let response = self
            .client
            .get(&artifact.url)
            .send()
            .await
            .map_err(|e| UpdateError::network(format!("Failed to download {}", artifact.name), e))?;

        let status = response.status();
        if !status.is_success() {
            // Drain the error body so the connection closes cleanly
            let _ = response.bytes().await;
            return Err(UpdateError::network_msg(format!(
                "Download of {} failed with status: {}",
                artifact.name, status
            )));
        }

        let expected = response.content_length();

        let mut staged = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(dir)
            .map_err(|e| UpdateError::filesystem("create temp file in", dir, e))?;
        debug!("Staging download at {:?}", staged.path());

        let progress = self.progress_bar(expected, &artifact.name);
        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk: Bytes = chunk_result
                .map_err(|e| UpdateError::network("Failed to read download chunk", e))?;
            staged
                .write_all(&chunk)
                .map_err(|e| UpdateError::filesystem("write", staged.path(), e))?;

            written += chunk.len() as u64;
            if let Some(pb) = &progress {
                pb.set_position(written);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        if written == 0 {
            return Err(UpdateError::network_msg(format!(
                "Downloaded artifact {} is empty",
                artifact.name
            )));
        }

        if let Some(expected) = expected {
            if written != expected {
                return Err(UpdateError::network_msg(format!(
                    "Download of {} was truncated: expected {} bytes, got {}",
                    artifact.name, expected, written
                )));
            }
        }

        staged
            .flush()
            .and_then(|_| staged.as_file().sync_all())
            .map_err(|e| UpdateError::filesystem("sync", staged.path(), e))?;

        info!("Downloaded {} ({})", artifact.name, human_readable_size(written));
        Ok(staged)
    }

    fn progress_bar(&self, total: Option<u64>, name: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = match total {
            Some(total) => {
                let pb = ProgressBar::new(total);
                let style = ProgressStyle::default_bar()
                    .template("{msg} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-");
                pb.set_style(style);
                pb
            }
            None => ProgressBar::new_spinner(),
        };
        pb.set_message(format!("Downloading {}", name));
        Some(pb)
    }
}

/// Convert bytes to human-readable size
fn human_readable_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}
