//! Query command handler.

use anyhow::{Context, Result};
use std::io::{self, Write};

use super::Workspace;
use super::notes::ABORTED;
use super::select::{OPEN_QUESTION, Selection, choose_with};
use crate::cli::{QueryArgs, StyleArgs};
use crate::infra::{EditorLauncher, Prompt, StdinPrompt};
use crate::repo::ZettelRepo;
use crate::search;

pub fn handle_query(args: &QueryArgs, ws: &Workspace) -> Result<()> {
    query_zettel(
        ws.repo(),
        &args.patterns,
        &args.style,
        &ws.config().editor(),
        &mut StdinPrompt,
        &mut io::stdout(),
    )?;
    Ok(())
}

/// Opens the zettel whose title matches all `patterns`, asking which one
/// when several do. Nothing is committed.
///
/// Returns `true` when the editor was started.
pub(crate) fn query_zettel<E: EditorLauncher, P: Prompt, W: Write>(
    repo: &ZettelRepo,
    patterns: &[String],
    style: &StyleArgs,
    editor: &E,
    prompt: &mut P,
    out: &mut W,
) -> Result<bool> {
    let matches = search::query_titles(repo, patterns)?;
    if matches.is_empty() {
        writeln!(out, "No zettels found!")?;
        return Ok(false);
    }

    match choose_with(matches, style, OPEN_QUESTION, prompt, out)? {
        Selection::Chosen(zettel) => {
            editor
                .open(zettel.path())
                .with_context(|| format!("failed to open zettel {}", zettel.id()))?;
            Ok(true)
        }
        Selection::NoMatch | Selection::Aborted => {
            writeln!(out, "{ABORTED}")?;
            Ok(false)
        }
    }
}
