//! Replacement of the running executable
//!
//! The swap is a backup-then-move sequence built on same-filesystem renames:
//!
//! 1. the new binary is staged in a temp file beside the executable
//! 2. the staged file is marked executable
//! 3. the executable is renamed to `<path>.backup`
//! 4. the staged file is renamed onto the executable path; on failure the
//!    backup is renamed back
//! 5. the backup is removed, best effort
//!
//! At every exit the executable path holds a runnable binary, except when
//! restoring the backup itself fails ([`UpdateError::RollbackFailed`]).

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, warn};

use crate::download::ArtifactDownloader;
use crate::error::{Result, UpdateError};
use crate::releases::Artifact;

/// Suffix appended to the executable path for the backup sibling
pub const BACKUP_SUFFIX: &str = ".backup";

/// Progress of a single swap; never outlives [`SelfReplacer::install`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapState {
    NotStarted,
    Downloaded,
    CurrentBackedUp,
    Replaced,
    BackupRemoved,
}

/// Filesystem operations used by the swap
///
/// The default methods act on the real filesystem. Tests override single
/// methods to inject failures at a chosen step.
pub trait FileOps {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    /// Make `path` executable by owner, group and others
    fn set_executable(&self, path: &Path) -> io::Result<()> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(path, perms)
        }

        #[cfg(not(unix))]
        {
            let _ = path;
            Ok(())
        }
    }
}

/// [`FileOps`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileOps;

impl FileOps for StdFileOps {}

/// Outcome of a completed swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReport {
    /// Final state: `BackupRemoved`, or `Replaced` when the backup stayed behind
    pub state: SwapState,

    /// Executable path that now holds the new binary
    pub target: PathBuf,

    /// Backup that could not be removed
    pub backup_left: Option<PathBuf>,
}

/// Swaps an executable for a downloaded replacement
pub struct SelfReplacer<F: FileOps = StdFileOps> {
    target: PathBuf,
    backup: PathBuf,
    ops: F,
}

impl SelfReplacer<StdFileOps> {
    /// Replace the executable at `target`
    pub fn new(target: impl Into<PathBuf>) -> Self {
        let target = target.into();
        Self {
            backup: backup_path_for(&target),
            target,
            ops: StdFileOps,
        }
    }

    /// Replace the currently running executable
    ///
    /// Symlinks are resolved so the file they point to is replaced.
    pub fn for_current_exe() -> Result<Self> {
        let exe = std::env::current_exe()
            .map_err(|e| UpdateError::filesystem("resolve", "the running executable", e))?;
        let exe = fs::canonicalize(&exe).unwrap_or(exe);
        debug!("Running executable resolved to {:?}", exe);
        Ok(Self::new(exe))
    }
}

impl<F: FileOps> SelfReplacer<F> {
    /// Use different filesystem operations
    pub fn with_ops<G: FileOps>(self, ops: G) -> SelfReplacer<G> {
        SelfReplacer {
            target: self.target,
            backup: self.backup,
            ops,
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    /// Directory downloads are staged in
    pub fn staging_dir(&self) -> &Path {
        self.target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    /// Download `artifact` and swap it in
    ///
    /// Nothing on disk changes until the download has fully succeeded.
    pub async fn replace_self(
        &self,
        downloader: &ArtifactDownloader,
        artifact: &Artifact,
    ) -> Result<SwapReport> {
        let staged = downloader.download(artifact, self.staging_dir()).await?;
        self.install(staged)
    }

    /// Swap the staged binary into the executable path
    pub fn install(&self, staged: NamedTempFile) -> Result<SwapReport> {
        let mut state = SwapState::NotStarted;
        advance(&mut state, SwapState::Downloaded);

        // Closes the descriptor; the path is still deleted on drop.
        let staged = staged.into_temp_path();

        self.ops
            .set_executable(&staged)
            .map_err(|e| UpdateError::filesystem("mark executable", &*staged, e))?;

        self.discard_stale_backup();

        self.ops
            .rename(&self.target, &self.backup)
            .map_err(|e| UpdateError::filesystem("back up", &self.target, e))?;
        advance(&mut state, SwapState::CurrentBackedUp);

        if let Err(e) = self.ops.rename(&staged, &self.target) {
            error!("Failed to move new executable into {:?}: {}", self.target, e);
            return Err(self.roll_back(e));
        }
        advance(&mut state, SwapState::Replaced);

        // The staged path was renamed away; nothing is left to delete.
        if let Err(e) = staged.keep() {
            debug!("Could not release staged path: {}", e);
        }

        let backup_left = match self.ops.remove_file(&self.backup) {
            Ok(()) => {
                advance(&mut state, SwapState::BackupRemoved);
                None
            }
            Err(e) => {
                warn!("Could not remove backup {:?}: {}", self.backup, e);
                Some(self.backup.clone())
            }
        };

        info!("Installed new executable at {:?}", self.target);
        Ok(SwapReport {
            state,
            target: self.target.clone(),
            backup_left,
        })
    }

    /// Restore the backup after a failed move and build the error to return
    fn roll_back(&self, cause: io::Error) -> UpdateError {
        warn!("Rolling back to {:?}", self.backup);

        match self.ops.rename(&self.backup, &self.target) {
            Ok(()) => {
                info!("Previous executable restored");
                UpdateError::filesystem("install new executable at", &self.target, cause)
            }
            Err(e) => {
                error!(
                    "Rollback failed, previous executable left at {:?}: {}",
                    self.backup, e
                );
                UpdateError::RollbackFailed {
                    backup: self.backup.clone(),
                    source: e,
                }
            }
        }
    }

    /// Remove a backup left by an earlier run
    ///
    /// Only done while the executable itself is present, since otherwise the
    /// backup may be the only copy.
    fn discard_stale_backup(&self) {
        if !self.backup.exists() || !self.target.exists() {
            return;
        }

        debug!("Removing stale backup {:?}", self.backup);
        if let Err(e) = self.ops.remove_file(&self.backup) {
            warn!("Could not remove stale backup {:?}: {}", self.backup, e);
        }
    }
}

fn advance(state: &mut SwapState, next: SwapState) {
    debug!("Swap state {:?} -> {:?}", state, next);
    *state = next;
}

/// `<path>.backup`, keeping any existing extension
pub fn backup_path_for(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}
