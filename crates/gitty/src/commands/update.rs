//! Update command

use anyhow::{Context, Result};
use dialoguer::Confirm;
use gitty_core::HierarchicalConfigLoader;
use gitty_update::{Artifact, GittyUpdater, Platform, ReleaseInfo, UpdateError};
use tracing::debug;

use crate::cli::UpdateArgs;
use crate::output;

/// Lines of release notes shown before the prompt
const NOTES_PREVIEW_LINES: usize = 15;

pub async fn run(args: UpdateArgs) -> Result<()> {
    let mut config = HierarchicalConfigLoader::new()
        .and_then(|loader| loader.load_runtime_config())
        .map_err(|e| explain(e.into()))?;
    if let Some(url) = args.index_url {
        config.release.index_url = url;
    }

    let updater = GittyUpdater::new(config, Platform::current()).map_err(explain)?;

    output::info(&format!("Current version: {}", updater.current_version()));

    let spinner = output::spinner("Checking for updates...");
    let check = updater.check().await;
    spinner.finish_and_clear();
    let check = check.map_err(explain)?;

    output::kv("Latest version", check.release.tag.as_str());

    if !check.newer {
        output::success("You're already running the latest version!");
        return Ok(());
    }

    output::success(&format!("A new version is available: {}", check.release.tag));
    show_release_notes(&check.release);

    if args.check {
        output::info("Run 'gitty update' to install it");
        return Ok(());
    }

    if !args.yes {
        let proceed = Confirm::new()
            .with_prompt("Do you want to update?")
            .default(false)
            .interact()
            .context("Could not read confirmation; rerun with --yes to update non-interactively")?;

        if !proceed {
            output::info("Update cancelled.");
            return Ok(());
        }
    }

    let Some(artifact) = select_or_report(&updater, &check.release)? else {
        return Ok(());
    };

    output::info(&format!("Downloading {}", artifact.name));
    let report = updater.apply(artifact).await.map_err(explain)?;

    if let Some(backup) = &report.backup_left {
        output::warning(&format!(
            "Previous version left at {}; it is safe to delete",
            backup.display()
        ));
    }

    output::success(&format!(
        "Updated gitty {} -> {}",
        check.current, check.release.tag
    ));
    Ok(())
}

/// Pick the artifact for this platform; a missing build is reported, not an error
fn select_or_report<'a>(
    updater: &GittyUpdater,
    release: &'a ReleaseInfo,
) -> Result<Option<&'a Artifact>> {
    match updater.select(release) {
        Ok(artifact) => Ok(Some(artifact)),
        Err(e @ UpdateError::NoCompatibleArtifact { .. }) => {
            output::warning(&e.to_string());
            output::info("Your current gitty installation was not changed");
            Ok(None)
        }
        Err(e) => Err(explain(e)),
    }
}

fn show_release_notes(release: &ReleaseInfo) {
    if let Some(date) = release.published_date() {
        output::kv("Published", date);
    }

    if release.body.trim().is_empty() {
        return;
    }

    output::header("Release notes");
    let preview: Vec<&str> = release.body.lines().take(NOTES_PREVIEW_LINES).collect();
    println!("{}", preview.join("\n"));
    if release.body.lines().count() > NOTES_PREVIEW_LINES {
        println!("...");
    }
    println!();
}

/// Attach an actionable hint for each failure class
fn explain(err: UpdateError) -> anyhow::Error {
    debug!("Update failed ({}): {:?}", err.kind(), err);

    let hint = match &err {
        UpdateError::Network { .. } => {
            "Could not reach the release server. Check your connection and try again; nothing was changed."
        }
        UpdateError::Decode(_) => {
            "The release server returned data gitty could not read. Try again later; nothing was changed."
        }
        UpdateError::NoCompatibleArtifact { .. } => {
            "This release has no build for your platform; nothing was changed."
        }
        UpdateError::Filesystem { .. } => {
            "The update could not be installed and your current gitty was left in place. Check write permissions on its directory."
        }
        UpdateError::RollbackFailed { .. } => {
            "The update failed and the previous gitty could not be restored automatically."
        }
        UpdateError::Config(_) => {
            "Fix ~/.gitty/gitty-runtime.yaml or the GITTY_* environment variables."
        }
    };

    anyhow::Error::new(err).context(hint)
}
