//! Add, edit and rm command handlers.

use anyhow::{Context, Result};
use std::io;

use super::select::{Selection, offer_new, select_zettel};
use super::{Workspace, describe};
use crate::cli::{RmArgs, TargetArgs};
use crate::domain::Zettel;
use crate::infra::{EditorLauncher, Prompt, StdinPrompt, Vcs};
use crate::lifecycle::{Lifecycle, Outcome};
use crate::repo::ZettelRepo;

pub(crate) const ADD_ABORTED: &str = "Adding zettel aborted, cleaning up...";
pub(crate) const EDIT_ABORTED: &str = "Editing zettel aborted, restoring the previous version...";
pub(crate) const ABORTED: &str = "aborting";

pub fn handle_add(ws: &Workspace) -> Result<()> {
    let outcome = add_zettel(ws.repo(), ws.git(), &ws.config().editor())?;
    println!("{}", describe(&outcome, ADD_ABORTED));
    Ok(())
}

pub fn handle_edit(args: &TargetArgs, ws: &Workspace) -> Result<()> {
    let mut prompt = StdinPrompt;
    let selection = select_zettel(
        ws,
        &args.target,
        args.ignore_case,
        &args.style,
        &mut prompt,
        &mut io::stdout(),
    )?;
    let zettel = match selection {
        Selection::Chosen(zettel) => zettel,
        Selection::NoMatch => return add_instead(ws, &mut prompt),
        Selection::Aborted => {
            println!("{ABORTED}");
            return Ok(());
        }
    };

    let outcome = edit_zettel(ws.repo(), ws.git(), &ws.config().editor(), &zettel)?;
    println!("{}", describe(&outcome, EDIT_ABORTED));
    Ok(())
}

pub fn handle_rm(args: &RmArgs, ws: &Workspace) -> Result<()> {
    let mut prompt = StdinPrompt;
    let selection = select_zettel(
        ws,
        &args.target,
        args.ignore_case,
        &args.style,
        &mut prompt,
        &mut io::stdout(),
    )?;
    let Selection::Chosen(zettel) = selection else {
        println!("{ABORTED}");
        return Ok(());
    };

    let outcome = remove_zettel(ws.repo(), ws.git(), &ws.config().editor(), &zettel, &mut prompt)?;
    println!("{}", describe(&outcome, ABORTED));
    Ok(())
}

/// Offers to add a zettel when a search came up empty.
pub(crate) fn add_instead<P: Prompt>(ws: &Workspace, prompt: &mut P) -> Result<()> {
    if offer_new(prompt)? {
        handle_add(ws)
    } else {
        println!("{ABORTED}");
        Ok(())
    }
}

pub(crate) fn add_zettel<V: Vcs, E: EditorLauncher>(
    repo: &ZettelRepo,
    vcs: &V,
    editor: &E,
) -> Result<Outcome> {
    Lifecycle::new(repo, vcs, editor)
        .add()
        .context("failed to add zettel")
}

pub(crate) fn edit_zettel<V: Vcs, E: EditorLauncher>(
    repo: &ZettelRepo,
    vcs: &V,
    editor: &E,
    zettel: &Zettel,
) -> Result<Outcome> {
    Lifecycle::new(repo, vcs, editor)
        .edit(zettel)
        .with_context(|| format!("failed to edit zettel {}", zettel.id()))
}

pub(crate) fn remove_zettel<V: Vcs, E: EditorLauncher, P: Prompt>(
    repo: &ZettelRepo,
    vcs: &V,
    editor: &E,
    zettel: &Zettel,
    prompt: &mut P,
) -> Result<Outcome> {
    Lifecycle::new(repo, vcs, editor)
        .remove(zettel, prompt)
        .with_context(|| format!("failed to remove zettel {}", zettel.id()))
}
