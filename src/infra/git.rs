//! Thin wrapper around the `git` executable.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use thiserror::Error;
use tracing::debug;

/// Errors from running `git`.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("'git' cannot be found on PATH")]
    NotInstalled,

    #[error("failed to run git {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("git {command} exited with status {}:\n{stderr}", exit_code(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

impl GitError {
    /// True for the "nothing matched" exit of `git grep`, which carries no
    /// error message.
    pub fn is_no_match(&self) -> bool {
        matches!(self, GitError::Failed { code: Some(1), stderr, .. } if stderr.trim().is_empty())
    }
}

/// Summary of the most recent commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub subject: String,
    /// Paths touched by the commit, relative to the repository root.
    pub files: Vec<String>,
}

/// Version control operations used by the note lifecycle.
///
/// Paths are relative to the repository root with `/` separators.
pub trait Vcs {
    /// Stages `path` (`git add`).
    fn stage(&self, path: &str) -> Result<(), GitError>;

    /// Stages the removal of `path` and everything below it.
    fn stage_removal(&self, path: &str) -> Result<(), GitError>;

    /// Creates a new commit with `message`.
    fn commit(&self, message: &str) -> Result<(), GitError>;

    /// Folds the staged changes into the last commit, replacing its message.
    fn amend(&self, message: &str) -> Result<(), GitError>;

    /// Returns the last commit, or `None` in a repository without commits.
    fn last_commit(&self) -> Result<Option<CommitSummary>, GitError>;

    /// True when `path` appears in at least one commit.
    fn is_tracked(&self, path: &str) -> Result<bool, GitError>;
}

/// Runs `git -C <repo> ...` as a subprocess.
#[derive(Debug, Clone)]
pub struct Git {
    repo: PathBuf,
}

impl Git {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    pub fn repo(&self) -> &Path {
        &self.repo
    }

    fn command(&self, args: &[&str]) -> Command {
        debug!("git -C {} {}", self.repo.display(), args.join(" "));
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.repo).args(args);
        cmd
    }

    fn spawn_output(&self, mut cmd: Command, args: &[&str]) -> Result<Output, GitError> {
        cmd.output().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GitError::NotInstalled,
            _ => GitError::Spawn {
                command: args.join(" "),
                source: e,
            },
        })
    }

    fn check(output: &Output, args: &[&str]) -> Result<(), GitError> {
        if output.status.success() {
            return Ok(());
        }
        Err(GitError::Failed {
            command: args.join(" "),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    /// Runs git with stdout going straight to the terminal.
    ///
    /// Standard error is captured so it can be attached to the error on
    /// failure; on success it is relayed as is.
    pub fn call(&self, args: &[&str]) -> Result<(), GitError> {
        let mut cmd = self.command(args);
        cmd.stdout(Stdio::inherit()).stderr(Stdio::piped());
        let output = self.spawn_output(cmd, args)?;
        Self::check(&output, args)?;
        if !output.stderr.is_empty() {
            eprint!("{}", String::from_utf8_lossy(&output.stderr));
        }
        Ok(())
    }

    /// Runs git and returns its captured standard output.
    pub fn output(&self, args: &[&str]) -> Result<String, GitError> {
        let cmd = self.command(args);
        let output = self.spawn_output(cmd, args)?;
        Self::check(&output, args)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// `git init --initial-branch <branch>`.
    pub fn init(&self, branch: &str) -> Result<(), GitError> {
        self.call(&["init", "--initial-branch", branch])
    }

    /// URL of the remote `name`, with SSH remotes converted to HTTPS.
    pub fn remote_url(&self, name: &str) -> Result<String, GitError> {
        let raw = self.output(&["remote", "get-url", name])?;
        Ok(ssh_to_https(raw.trim()))
    }
}

impl Vcs for Git {
    fn stage(&self, path: &str) -> Result<(), GitError> {
        self.output(&["add", "--", path]).map(drop)
    }

    fn stage_removal(&self, path: &str) -> Result<(), GitError> {
        self.output(&["rm", "-r", "-q", "--cached", "--ignore-unmatch", "--", path])
            .map(drop)
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        self.call(&["commit", "-q", "-m", message])
    }

    fn amend(&self, message: &str) -> Result<(), GitError> {
        self.call(&["commit", "-q", "--amend", "-m", message])
    }

    fn last_commit(&self) -> Result<Option<CommitSummary>, GitError> {
        match self.output(&["rev-parse", "--verify", "-q", "HEAD"]) {
            Ok(_) => {}
            Err(GitError::Failed { .. }) => return Ok(None),
            Err(e) => return Err(e),
        }
        let out = self.output(&["show", "--name-only", "--format=%s", "HEAD"])?;
        Ok(Some(parse_show_output(&out)))
    }

    fn is_tracked(&self, path: &str) -> Result<bool, GitError> {
        let has_head = self.output(&["rev-parse", "--verify", "-q", "HEAD"]).is_ok();
        if !has_head {
            return Ok(false);
        }
        let out = self.output(&["log", "-1", "--format=%H", "--", path])?;
        Ok(!out.trim().is_empty())
    }
}

/// Parses `git show --name-only --format=%s` output: the subject, a blank
/// line, then one touched path per line.
fn parse_show_output(out: &str) -> CommitSummary {
    let mut lines = out.lines();
    let subject = lines.next().unwrap_or_default().to_string();
    let files = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    CommitSummary { subject, files }
}

/// Converts `git@host:user/repo.git` into `https://host/user/repo.git`.
///
/// Any other URL is returned unchanged.
pub fn ssh_to_https(remote: &str) -> String {
    match remote.strip_prefix("git@") {
        Some(rest) => format!("https://{}", rest.replacen(':', "/", 1)),
        None => remote.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ssh_remotes_become_https() {
        let cases = [
            (
                "https://github.com/user/notes.git",
                "https://github.com/user/notes.git",
            ),
            (
                "git@github.com:user/notes.git",
                "https://github.com/user/notes.git",
            ),
            (
                "git@gitlab.com:user/repo.git",
                "https://gitlab.com/user/repo.git",
            ),
            (
                "git@bitbucket.org:user/repo.git",
                "https://bitbucket.org/user/repo.git",
            ),
        ];
        for (raw, expected) in cases {
            assert_eq!(ssh_to_https(raw), expected);
        }
    }

    #[test]
    fn parses_show_output() {
        let out = "ED: Some title\n\ndocs/20211016205158/README.md\n";
        assert_eq!(
            parse_show_output(out),
            CommitSummary {
                subject: "ED: Some title".into(),
                files: vec!["docs/20211016205158/README.md".into()],
            }
        );
    }

    #[test]
    fn parses_show_output_without_files() {
        let summary = parse_show_output("Empty commit\n");
        assert_eq!(summary.subject, "Empty commit");
        assert!(summary.files.is_empty());
    }

    #[test]
    fn grep_no_match_is_recognized() {
        let err = GitError::Failed {
            command: "grep".into(),
            code: Some(1),
            stderr: String::new(),
        };
        assert!(err.is_no_match());

        let err = GitError::Failed {
            command: "grep".into(),
            code: Some(128),
            stderr: "fatal: not a git repository".into(),
        };
        assert!(!err.is_no_match());
    }

    #[test]
    fn failed_error_includes_stderr() {
        let err = GitError::Failed {
            command: "push".into(),
            code: Some(1),
            stderr: "rejected".into(),
        };
        assert_eq!(err.to_string(), "git push exited with status 1:\nrejected");
    }
}
