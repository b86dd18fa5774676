//! Show command handler.

use anyhow::{Context, Result, bail};
use std::io;

use super::Workspace;
use super::notes::{ABORTED, add_instead};
use super::select::{Selection, select_zettel};
use crate::cli::{ShowArgs, ShowFormat};
use crate::domain::{Zettel, ZettelId};
use crate::infra::StdinPrompt;
use crate::repo::NOTES_DIR;

/// Width of the banner framing `show` output.
pub(crate) const ZETTEL_WIDTH: usize = 72;

const FILL: char = '=';

pub fn handle_show(args: &ShowArgs, ws: &Workspace) -> Result<()> {
    let mut prompt = StdinPrompt;
    let target = &args.target;
    let selection = select_zettel(
        ws,
        &target.target,
        target.ignore_case,
        &target.style,
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

    match args.format {
        ShowFormat::Text => print!("{}", framed(&zettel)),
        ShowFormat::Mdlink => println!("{}", zettel.md_link()),
        ShowFormat::Url => {
            let remote = ws
                .git()
                .remote_url(&args.name)
                .with_context(|| format!("failed to get URL of remote '{}'", args.name))?;
            println!("{}", zettel_url(&remote, &args.branch, zettel.id())?);
        }
    }
    Ok(())
}

/// Zettel content between a banner with its ID and a closing rule.
pub(crate) fn framed(zettel: &Zettel) -> String {
    let mut text = center(&format!(" {} ", zettel.id()), ZETTEL_WIDTH, FILL);
    text.push('\n');
    text.push_str(zettel.content());
    if !zettel.content().ends_with('\n') {
        text.push('\n');
    }
    text.extend(std::iter::repeat_n(FILL, ZETTEL_WIDTH));
    text.push('\n');
    text
}

/// Centers `text` in `width` columns; odd padding goes right unless
/// `width` is odd too.
pub(crate) fn center(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;

    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n(fill, left));
    out.push_str(text);
    out.extend(std::iter::repeat_n(fill, right));
    out
}

/// Web URL of a zettel folder on GitHub, GitLab or Bitbucket.
pub(crate) fn zettel_url(remote: &str, branch: &str, id: &ZettelId) -> Result<String> {
    let base = remote.strip_suffix(".git").unwrap_or(remote);
    let path = format!("{NOTES_DIR}/{id}");
    if base.contains("github.com") {
        Ok(format!("{base}/tree/{branch}/{path}"))
    } else if base.contains("gitlab.com") {
        Ok(format!("{base}/-/tree/{branch}/{path}"))
    } else if base.contains("bitbucket.org") {
        Ok(format!("{base}/src/{branch}/{path}"))
    } else {
        bail!("cannot build a zettel URL for remote '{remote}'")
    }
}
