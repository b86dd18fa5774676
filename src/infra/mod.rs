//! Subprocesses, terminal I/O and logging

pub mod editor;
pub mod git;
pub mod logging;
pub mod prompt;

pub use editor::{EditorError, EditorLauncher, ExternalEditor};
pub use git::{CommitSummary, Git, GitError, Vcs, ssh_to_https};
pub use prompt::{Prompt, ScriptedPrompt, StdinPrompt};

use std::path::PathBuf;

/// Expands a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(path),
    }
}
