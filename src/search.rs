//! Searching zettels with `git grep`.
//!
//! Several patterns are AND-ed: each pattern runs as its own `git grep` and
//! the matching file sets are intersected. Title queries skip Git and match
//! regexes against parsed titles.

use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::Zettel;
use crate::infra::{Git, GitError};
use crate::repo::{NOTES_DIR, RepoError, ZETTEL_FILENAME, ZettelRepo};

/// Pattern added by `grep --title` to also print each zettel's title line.
pub const TITLE_PATTERN: &str = r"^#\s.*";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no grep patterns given")]
    NoPatterns,

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Options shared by every search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub ignore_case: bool,
}

/// Options for printing grep results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    pub ignore_case: bool,
    /// Also print the title line of each matched zettel.
    pub title: bool,
    /// Extra flags handed to `git grep` as is.
    pub flags: Vec<String>,
}

/// Drops blank patterns; fails when nothing is left.
pub fn usable_patterns(patterns: &[String]) -> Result<Vec<&str>, SearchError> {
    let usable: Vec<&str> = patterns
        .iter()
        .map(String::as_str)
        .filter(|p| !p.trim().is_empty())
        .collect();
    if usable.is_empty() {
        return Err(SearchError::NoPatterns);
    }
    Ok(usable)
}

/// Pathspec limiting searches to zettel files.
fn zettel_pathspec() -> String {
    format!("{NOTES_DIR}/*/{ZETTEL_FILENAME}")
}

/// Arguments of the `git grep` that lists files matching one pattern.
pub fn file_search_args(pattern: &str, opts: &SearchOptions) -> Vec<String> {
    let mut args: Vec<String> = vec!["grep".into(), "-I".into(), "--name-only".into()];
    if opts.ignore_case {
        args.push("--ignore-case".into());
    }
    args.extend(["-e".into(), pattern.into(), "--".into(), zettel_pathspec()]);
    args
}

/// Arguments of the `git grep` that prints matches in `files`.
pub fn display_args(patterns: &[&str], files: &BTreeSet<String>, opts: &DisplayOptions) -> Vec<String> {
    let mut args: Vec<String> = ["grep", "--heading", "--break", "-I", "-n"]
        .into_iter()
        .map(String::from)
        .collect();
    if opts.ignore_case {
        args.push("--ignore-case".into());
    }
    args.extend(opts.flags.iter().cloned());
    for pattern in patterns {
        args.push("-e".into());
        args.push((*pattern).into());
    }
    if opts.title {
        args.push("-e".into());
        args.push(TITLE_PATTERN.into());
    }
    args.push("--".into());
    args.extend(files.iter().cloned());
    args
}

/// Intersects per-pattern match sets; stops early once empty.
pub fn intersect_all<I>(sets: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = BTreeSet<String>>,
{
    let mut acc: Option<BTreeSet<String>> = None;
    for set in sets {
        let next = match acc {
            None => set,
            Some(prev) => prev.intersection(&set).cloned().collect(),
        };
        if next.is_empty() {
            return next;
        }
        acc = Some(next);
    }
    acc.unwrap_or_default()
}

/// Runs `git grep`, treating "nothing matched" as empty output.
fn grep_output(git: &Git, args: &[String]) -> Result<String, GitError> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match git.output(&args) {
        Ok(out) => Ok(out),
        Err(e) if e.is_no_match() => Ok(String::new()),
        Err(e) => Err(e),
    }
}

/// Returns repository-relative paths of zettel files matching all patterns.
pub fn matching_files(
    git: &Git,
    patterns: &[&str],
    opts: &SearchOptions,
) -> Result<BTreeSet<String>, SearchError> {
    if patterns.is_empty() {
        return Err(SearchError::NoPatterns);
    }

    let mut sets = Vec::with_capacity(patterns.len());
    for pattern in patterns {
        let out = grep_output(git, &file_search_args(pattern, opts))?;
        let files: BTreeSet<String> = out
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
        debug!("grep: pattern {:?} matched {} file(s)", pattern, files.len());
        if files.is_empty() {
            return Ok(files);
        }
        sets.push(files);
    }
    Ok(intersect_all(sets))
}

/// Returns zettels matching all patterns, in ascending ID order.
pub fn find_zettels(
    repo: &ZettelRepo,
    git: &Git,
    patterns: &[String],
    opts: &SearchOptions,
) -> Result<Vec<Zettel>, SearchError> {
    let patterns = usable_patterns(patterns)?;
    let files = matching_files(git, &patterns, opts)?;

    let mut zettels = Vec::new();
    for file in &files {
        let Some(id) = ZettelRepo::id_from_git_path(file) else {
            debug!("grep: skipping '{}'", file);
            continue;
        };
        match repo.get(&id) {
            Ok(zettel) => zettels.push(zettel),
            Err(RepoError::EmptyZettel { id }) => {
                warn!("empty zettel folder '{}' detected", id);
            }
            Err(RepoError::NotUtf8 { id }) => {
                warn!("zettel '{}' is not valid UTF-8, skipping", id);
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(zettels)
}

/// Case insensitive regexes for matching titles.
pub fn title_regexes(patterns: &[String]) -> Result<Vec<Regex>, SearchError> {
    usable_patterns(patterns)?
        .into_iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(SearchError::from)
        })
        .collect()
}

/// Keeps zettels whose title matches every regex.
pub fn filter_by_title<I>(zettels: I, regexes: &[Regex]) -> Vec<Zettel>
where
    I: IntoIterator<Item = Zettel>,
{
    zettels
        .into_iter()
        .filter(|z| regexes.iter().all(|re| re.is_match(z.title())))
        .collect()
}

/// Returns zettels whose title matches all patterns, in ascending ID order.
///
/// Only titles are searched, so no Git call is needed.
pub fn query_titles(repo: &ZettelRepo, patterns: &[String]) -> Result<Vec<Zettel>, SearchError> {
    let regexes = title_regexes(patterns)?;
    let zettels = repo.zettels()?.collect::<Result<Vec<_>, _>>()?;
    Ok(filter_by_title(zettels, &regexes))
}

/// Prints matches of all patterns, grouped per zettel file.
///
/// Grep runs inside the notes directory so headings read `<id>/README.md`.
/// Returns `false` when no zettel matched every pattern.
pub fn display(git: &Git, patterns: &[String], opts: &DisplayOptions) -> Result<bool, SearchError> {
    let patterns = usable_patterns(patterns)?;
    let search = SearchOptions {
        ignore_case: opts.ignore_case,
    };
    let files = matching_files(git, &patterns, &search)?;
    if files.is_empty() {
        return Ok(false);
    }

    let files = relative_to_notes_dir(&files);
    let args = display_args(&patterns, &files, opts);
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    Git::new(git.repo().join(NOTES_DIR)).call(&args)?;
    Ok(true)
}

fn relative_to_notes_dir(files: &BTreeSet<String>) -> BTreeSet<String> {
    let prefix = format!("{NOTES_DIR}/");
    files
        .iter()
        .map(|f| f.strip_prefix(&prefix).unwrap_or(f).to_string())
        .collect()
}
