//! Info command handler.

use anyhow::{Context, Result};
use walkdir::WalkDir;

use super::Workspace;
use crate::domain::TagIndex;
use crate::infra::Git;
use crate::repo::ZettelRepo;

/// Statistics about a repository.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RepoStats {
    pub notes: usize,
    pub lines: usize,
    pub words: usize,
    pub bytes: usize,
    pub tags: usize,
    pub unique_tags: usize,
    pub git_size_kib: u64,
    pub git_size_pack_kib: u64,
}

pub fn handle_info(ws: &Workspace) -> Result<()> {
    let mut stats = collect_stats(ws.repo())?;
    let (size, size_pack) = git_sizes(ws.git())?;
    stats.git_size_kib = size;
    stats.git_size_pack_kib = size_pack;
    println!("{}", format_stats(&stats));
    Ok(())
}

/// Counts notes and tags, and text totals over every Markdown file in the
/// notes directory.
pub(crate) fn collect_stats(repo: &ZettelRepo) -> Result<RepoStats> {
    let zettels = repo.list_all()?;
    let index = TagIndex::build(&zettels);
    let mut stats = RepoStats {
        notes: zettels.len(),
        tags: index.total(),
        unique_tags: index.distinct(),
        ..Default::default()
    };

    for entry in WalkDir::new(repo.notes_dir()).sort_by_file_name() {
        let entry = entry.context("failed to walk notes directory")?;
        let is_markdown = entry.path().extension().is_some_and(|ext| ext == "md");
        if !entry.file_type().is_file() || !is_markdown {
            continue;
        }
        let text = std::fs::read_to_string(entry.path())
            .with_context(|| format!("failed to read {}", entry.path().display()))?;
        let (lines, words, bytes) = count_text(&text);
        stats.lines += lines;
        stats.words += words;
        stats.bytes += bytes;
    }
    Ok(stats)
}

/// Newlines, whitespace separated words and bytes, as `wc` counts them.
pub(crate) fn count_text(text: &str) -> (usize, usize, usize) {
    let lines = text.bytes().filter(|&b| b == b'\n').count();
    let words = text.split_whitespace().count();
    (lines, words, text.len())
}

fn git_sizes(git: &Git) -> Result<(u64, u64)> {
    let out = git.output(&["count-objects", "-v"])?;
    Ok(parse_count_objects(&out))
}

/// Extracts `size` and `size-pack` (KiB) from `git count-objects -v`.
pub(crate) fn parse_count_objects(out: &str) -> (u64, u64) {
    let mut size = 0;
    let mut size_pack = 0;
    for line in out.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().parse().unwrap_or(0);
        match key.trim() {
            "size" => size = value,
            "size-pack" => size_pack = value,
            _ => {}
        }
    }
    (size, size_pack)
}

pub(crate) fn format_stats(stats: &RepoStats) -> String {
    let mib = |bytes: f64| bytes / 1024.0 / 1024.0;
    format!(
        "Number of notes:       {}
Number of lines:       {}
Number of words:       {}
Number of bytes:       {}
Number of tags:        {}
Number of unique tags: {}
Size on disk:          {:.2} MiB
Git repo size:         {:.2} MiB
Git repo size-pack:    {:.2} MiB",
        stats.notes,
        stats.lines,
        stats.words,
        stats.bytes,
        stats.tags,
        stats.unique_tags,
        mib(stats.bytes as f64),
        stats.git_size_kib as f64 / 1024.0,
        stats.git_size_pack_kib as f64 / 1024.0,
    )
}
