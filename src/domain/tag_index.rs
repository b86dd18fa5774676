//! Tag frequencies across a set of zettels.

use std::collections::BTreeMap;

use super::Zettel;

/// Occurrence count of every tag.
///
/// Tags are compared as exact, case-sensitive strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    counts: BTreeMap<String, usize>,
}

impl TagIndex {
    /// Counts the tags of every zettel yielded by `zettels`.
    pub fn build<'a, I>(zettels: I) -> Self
    where
        I: IntoIterator<Item = &'a Zettel>,
    {
        let mut counts = BTreeMap::new();
        for zettel in zettels {
            for tag in zettel.tags() {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Number of zettels carrying `tag`.
    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// Number of distinct tags.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all tag occurrences.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Tags ordered by ascending count, ties broken alphabetically.
    ///
    /// With `reverse` the whole order is flipped.
    pub fn by_count(&self, reverse: bool) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self
            .counts
            .iter()
            .map(|(tag, count)| (tag.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        if reverse {
            entries.reverse();
        }
        entries
    }
}
