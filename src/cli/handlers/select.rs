//! Picking a single zettel from an ID, the latest one, or grep matches.

use anyhow::Result;
use std::io::Write;

use super::Workspace;
use crate::cli::StyleArgs;
use crate::domain::{Zettel, ZettelId};
use crate::infra::Prompt;
use crate::search::{self, SearchOptions};

/// Above this many matches the user confirms before they are listed.
pub(crate) const CONFIRM_THRESHOLD: usize = 50;

/// Asked before acting on the only match of a search.
pub(crate) const CONTINUE_QUESTION: &str = "Continue? (Y/n): ";

/// Asked before opening the only match of a title query.
pub(crate) const OPEN_QUESTION: &str = "Open? (Y/n): ";

/// What the positional arguments of edit/show/rm refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Target {
    Latest,
    Id(ZettelId),
    Patterns(Vec<String>),
}

impl Target {
    /// A single valid ID selects that zettel; anything else is patterns.
    pub(crate) fn parse(args: &[String]) -> Self {
        match args {
            [] => Target::Latest,
            [single] => match single.parse() {
                Ok(id) => Target::Id(id),
                Err(_) => Target::Patterns(args.to_vec()),
            },
            _ => Target::Patterns(args.to_vec()),
        }
    }
}

#[derive(Debug)]
pub(crate) enum Selection {
    Chosen(Zettel),
    NoMatch,
    Aborted,
}

/// `<id> -- <title>`, optionally with a pretty timestamp and tags.
pub(crate) fn zettel_line(zettel: &Zettel, style: &StyleArgs) -> String {
    let head = if style.pretty {
        zettel.id().pretty()
    } else {
        zettel.id().to_string()
    };
    let tags = match zettel.tags_str() {
        Some(tags) if style.tags => format!("  [{tags}]"),
        _ => String::new(),
    };
    format!("{head} -- {}{tags}", zettel.title())
}

/// Resolves `target` to one zettel, asking the user when grep matches.
pub(crate) fn select_zettel<P: Prompt, W: Write>(
    ws: &Workspace,
    target: &[String],
    ignore_case: bool,
    style: &StyleArgs,
    prompt: &mut P,
    out: &mut W,
) -> Result<Selection> {
    match Target::parse(target) {
        Target::Latest => Ok(Selection::Chosen(ws.repo().latest()?)),
        Target::Id(id) => Ok(Selection::Chosen(ws.repo().get(&id)?)),
        Target::Patterns(patterns) => {
            let opts = SearchOptions { ignore_case };
            let matches = search::find_zettels(ws.repo(), ws.git(), &patterns, &opts)?;
            if matches.is_empty() {
                writeln!(out, "No zettels found!")?;
            }
            choose(matches, style, prompt, out)
        }
    }
}

/// Lets the user pick one of `matches`.
pub(crate) fn choose<P: Prompt, W: Write>(
    matches: Vec<Zettel>,
    style: &StyleArgs,
    prompt: &mut P,
    out: &mut W,
) -> Result<Selection> {
    choose_with(matches, style, CONTINUE_QUESTION, prompt, out)
}

/// Like [`choose`], asking `single_question` when there is one match.
pub(crate) fn choose_with<P: Prompt, W: Write>(
    mut matches: Vec<Zettel>,
    style: &StyleArgs,
    single_question: &str,
    prompt: &mut P,
    out: &mut W,
) -> Result<Selection> {
    let count = matches.len();
    if count == 0 {
        return Ok(Selection::NoMatch);
    }
    if count > CONFIRM_THRESHOLD {
        let question = format!("Are you sure to continue with {count} matches? (y/N): ");
        if !prompt.confirm(&question)? {
            return Ok(Selection::Aborted);
        }
    }

    let width = count.to_string().len();
    for (idx, zettel) in matches.iter().enumerate() {
        writeln!(out, "[{:0width$}] {}", idx + 1, zettel_line(zettel, style))?;
    }
    out.flush()?;

    if count == 1 {
        return Ok(match prompt.ask(single_question)?.as_deref() {
            None | Some("n") => Selection::Aborted,
            Some(_) => Selection::Chosen(matches.swap_remove(0)),
        });
    }

    loop {
        let Some(answer) = prompt.ask("#? ")? else {
            return Ok(Selection::Aborted);
        };
        if answer.is_empty() {
            return Ok(Selection::Aborted);
        }
        match answer.parse::<usize>() {
            Ok(idx) if (1..=count).contains(&idx) => {
                return Ok(Selection::Chosen(matches.swap_remove(idx - 1)));
            }
            _ => writeln!(out, "Wrong ID provided!")?,
        }
    }
}

/// Asks whether to create a new zettel after nothing matched.
pub(crate) fn offer_new<P: Prompt>(prompt: &mut P) -> Result<bool> {
    Ok(prompt.confirm("Create a new zettel? (y/N): ")?)
}
