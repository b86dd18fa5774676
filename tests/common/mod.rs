//! Test fixture utilities for integration tests.

pub mod harness;

use std::path::PathBuf;

/// Returns the path to the fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Read-only repository with three zettels.
///
/// - `20211016205158` "Zet test entry" with three tags
/// - `20211016223643` "Another zet test entry" with one tag
/// - `20220101220852` "Zettel with UTF-8" without tags
pub fn fixture_repo() -> PathBuf {
    fixtures_dir().join("zet")
}
