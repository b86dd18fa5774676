//! Init command handler.

use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::info;

use crate::cli::InitArgs;
use crate::infra::Git;
use crate::repo::NOTES_DIR;

pub fn handle_init(args: &InitArgs, repo: &Path) -> Result<()> {
    create_empty_folder(repo)?;
    create_empty_folder(&repo.join(NOTES_DIR))?;
    Git::new(repo).init(&args.initial_branch)?;
    info!("init: create git repo '{}'", repo.display());
    Ok(())
}

/// Creates `path`, or accepts it when it is an empty folder.
pub(crate) fn create_empty_folder(path: &Path) -> Result<()> {
    if !path.exists() {
        return std::fs::create_dir_all(path)
            .with_context(|| format!("failed to create folder: {}", path.display()));
    }
    if !path.is_dir() {
        bail!("'{}' exists and is a file.", path.display());
    }
    let mut entries = std::fs::read_dir(path)
        .with_context(|| format!("failed to read folder: {}", path.display()))?;
    if entries.next().is_some() {
        bail!("'{}' folder exists and it's not empty.", path.display());
    }
    Ok(())
}
