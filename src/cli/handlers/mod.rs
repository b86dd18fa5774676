//! Command handlers for the CLI.

mod clean;
mod git_cmds;
mod grep;
mod info;
mod init;
mod list;
mod notes;
mod query;
mod select;
mod show;


use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::cli::config::Config;
use crate::infra::Git;
use crate::lifecycle::Outcome;
use crate::repo::ZettelRepo;

// Re-export public items
pub use clean::handle_clean;
pub use git_cmds::{handle_pull, handle_push, handle_remote, handle_status};
pub use grep::handle_grep;
pub use info::{RepoStats, handle_info};
pub use init::handle_init;
pub use list::{handle_list, handle_tags};
pub use notes::{handle_add, handle_edit, handle_rm};
pub use query::handle_query;
pub use show::handle_show;

// ===========================================
// Shared Utilities
// ===========================================

/// Everything a command needs to work on an existing repository.
#[derive(Debug)]
pub struct Workspace {
    config: Config,
    repo: ZettelRepo,
    git: Git,
}

impl Workspace {
    /// Opens the configured repository, which must already exist.
    pub fn open(config: Config) -> Result<Self> {
        config.ensure_repo()?;
        let repo = ZettelRepo::open(&config.repo)?;
        let git = Git::new(&config.repo);
        Ok(Self { config, repo, git })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repo(&self) -> &ZettelRepo {
        &self.repo
    }

    pub fn git(&self) -> &Git {
        &self.git
    }
}

/// Message printed after a lifecycle operation.
///
/// `aborted` is the notice shown when the user backed out.
pub(crate) fn describe(outcome: &Outcome, aborted: &str) -> String {
    match outcome {
        Outcome::Added(id) => format!("{id} was created"),
        Outcome::Edited {
            id,
            squashed: false,
        } => format!("{id} was edited"),
        Outcome::Edited { id, squashed: true } => format!(
            "{id} was edited and auto-squashed with the last commit\nForce push might be required"
        ),
        Outcome::Unchanged(id) => format!("{id} wasn't modified"),
        Outcome::Removed(id) => format!("{id} was removed"),
        Outcome::Aborted => aborted.to_string(),
    }
}

pub fn handle_sample_config(kind: crate::cli::ConfigKind) -> Result<()> {
    print!("{}", crate::cli::sample_config::sample_config(kind));
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
