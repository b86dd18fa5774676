//! Zettel type and the parser extracting its title and tags.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

use super::ZettelId;

/// Single `#`, a single space, then text without surrounding whitespace.
static MARKDOWN_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^# (\S(?:.*\S)?)$").expect("title regex is valid"));

/// Minimum indentation of the trailing tag line.
const TAG_INDENT: &str = "    ";

/// Errors from parsing zettel content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseZettelError {
    #[error("zettel content is empty")]
    Empty,

    #[error("zettel title line is empty")]
    EmptyTitle,
}

/// Title and tags extracted from zettel content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedContent {
    pub title: String,
    pub tags: BTreeSet<String>,
    /// The first line is not a well formatted `# Title` heading and was
    /// taken verbatim.
    pub malformed_title: bool,
}

/// Parses the raw text of a zettel.
///
/// The title comes from the first line. When it reads `# <text>` with no
/// whitespace around `<text>`, the title is `<text>`; otherwise the whole
/// line is used and `malformed_title` is set.
///
/// Tags come from the last non-blank line. It must be indented by at
/// least four spaces and consist only of `#tag` tokens, otherwise there are
/// no tags.
///
/// # Errors
///
/// Returns [`ParseZettelError::Empty`] for empty or whitespace-only content
/// and [`ParseZettelError::EmptyTitle`] when the first line is blank.
pub fn parse_content(content: &str) -> Result<ParsedContent, ParseZettelError> {
    if content.trim().is_empty() {
        return Err(ParseZettelError::Empty);
    }

    let first_line = content.lines().next().unwrap_or_default();
    if first_line.trim().is_empty() {
        return Err(ParseZettelError::EmptyTitle);
    }

    let (title, malformed_title) = match parse_title(first_line) {
        Some(title) => (title.to_string(), false),
        None => (first_line.to_string(), true),
    };

    Ok(ParsedContent {
        title,
        tags: parse_tags(content),
        malformed_title,
    })
}

/// Returns the heading text of a well formatted Markdown title line.
pub fn parse_title(line: &str) -> Option<&str> {
    MARKDOWN_TITLE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extracts tags from the last non-blank line of `content`.
pub fn parse_tags(content: &str) -> BTreeSet<String> {
    let Some(last) = content.lines().rev().find(|line| !line.trim().is_empty()) else {
        return BTreeSet::new();
    };
    if !last.starts_with(TAG_INDENT) {
        return BTreeSet::new();
    }

    let mut tags = BTreeSet::new();
    for token in last.split_whitespace() {
        match token.strip_prefix('#') {
            Some(tag) if !tag.is_empty() => {
                tags.insert(tag.to_string());
            }
            _ => return BTreeSet::new(),
        }
    }
    tags
}

/// A single note stored as `<notes dir>/<id>/README.md`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zettel {
    id: ZettelId,
    title: String,
    tags: BTreeSet<String>,
    #[serde(skip)]
    content: String,
    path: PathBuf,
}

impl Zettel {
    /// Builds a zettel from its ID, file path and raw content.
    pub fn from_content(
        id: ZettelId,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
    ) -> Result<(Self, ParsedContent), ParseZettelError> {
        let content = content.into();
        let parsed = parse_content(&content)?;
        let zettel = Self {
            id,
            title: parsed.title.clone(),
            tags: parsed.tags.clone(),
            content,
            path: path.into(),
        };
        Ok((zettel, parsed))
    }

    pub fn id(&self) -> &ZettelId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Path of the zettel's note file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the folder holding the zettel.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }

    /// Tags as `#a #b`, or `None` when the zettel has no tags.
    pub fn tags_str(&self) -> Option<String> {
        if self.tags.is_empty() {
            return None;
        }
        let tags: Vec<_> = self.tags.iter().map(|t| format!("#{t}")).collect();
        Some(tags.join(" "))
    }

    /// Relative Markdown link to the zettel, as a list item.
    pub fn md_link(&self) -> String {
        format!("* [{id}](../{id}) {}", self.title, id = self.id)
    }
}
