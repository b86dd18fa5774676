//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several test crates
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::common::{fixture_repo, fixtures_dir};

/// Fluent wrapper around `assert_cmd::Command` for the `zet` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct ZetCommand {
    args: Vec<String>,
    stdin: Option<String>,
}

impl ZetCommand {
    /// Creates a new command for the `zet` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Command running against the read-only fixture repository.
    pub fn fixture() -> Self {
        Self::new()
            .config(&fixtures_dir().join("zet.yaml"))
            .repo(&fixture_repo())
    }

    /// Sets the `--config` option.
    pub fn config(mut self, path: &Path) -> Self {
        self.args.push("--config".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Sets the `--repo` option.
    pub fn repo(mut self, path: &Path) -> Self {
        self.args.push("--repo".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Feeds `input` to the prompts of the command.
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("zet").expect("Failed to find zet binary");
        cmd.args(&self.args)
            .env("GIT_AUTHOR_NAME", "Zet Tester")
            .env("GIT_AUTHOR_EMAIL", "tester@example.com")
            .env("GIT_COMMITTER_NAME", "Zet Tester")
            .env("GIT_COMMITTER_EMAIL", "tester@example.com")
            .env_remove("RUST_LOG");
        cmd.write_stdin(self.stdin.unwrap_or_default());
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects failure, and returns stderr as a string.
    pub fn output_failure(self) -> String {
        let output = self.assert().failure().get_output().stderr.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `list` command.
    pub fn list(self) -> Self {
        self.args(["list"])
    }

    /// Configures for the `tags` command.
    pub fn tags(self) -> Self {
        self.args(["tags"])
    }

    /// Configures for the `show` command with an ID.
    pub fn show(self, id: &str) -> Self {
        self.args(["show", id])
    }

    /// Configures for the `grep` command with patterns.
    pub fn grep(self, patterns: &[&str]) -> Self {
        self.args(["grep"]).args(patterns)
    }
}

impl Default for ZetCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // ZetCommand Basics
    // ===========================================

    #[test]
    fn test_command_runs_binary() {
        ZetCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_output_success() {
        let output = ZetCommand::new().args(["--help"]).output_success();
        assert!(output.contains("zet"));
    }

    #[test]
    fn test_fixture_puts_options_before_subcommand() {
        let cmd = ZetCommand::fixture().list();
        let args = cmd.get_args();
        assert_eq!(args[0], "--config");
        assert_eq!(args[2], "--repo");
        assert_eq!(args[4], "list");
    }
}
