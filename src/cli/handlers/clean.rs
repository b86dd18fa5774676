//! Clean command handler.

use anyhow::{Context, Result};

use crate::cli::CleanArgs;
use crate::lifecycle;
use crate::repo::{EmptyFolder, ZettelRepo};

pub fn handle_clean(args: &CleanArgs, repo: &ZettelRepo) -> Result<()> {
    let delete = args.force && !args.dry_run;
    let folders = lifecycle::clean(repo, delete).context("failed to clean repository")?;
    for line in clean_report(&folders, args) {
        println!("{line}");
    }
    Ok(())
}

/// Lines printed for the empty folders found, newest name first.
pub(crate) fn clean_report(folders: &[EmptyFolder], args: &CleanArgs) -> Vec<String> {
    let delete = args.force && !args.dry_run;
    let mut lines: Vec<String> = folders
        .iter()
        .rev()
        .map(|folder| {
            if delete {
                format!("deleting {}", folder.name)
            } else {
                format!("will delete {}", folder.name)
            }
        })
        .collect();
    if !folders.is_empty() && !args.force {
        lines.push("use '--force' to proceed with deletion".to_string());
    }
    lines
}
