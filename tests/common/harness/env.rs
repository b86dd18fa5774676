//! Isolated zettel repository in a temp directory.

use super::{TestZettel, ZetCommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use zet::repo::{NOTES_DIR, ZETTEL_FILENAME};

/// Config file written for each environment.
#[derive(Serialize)]
struct ConfigYaml<'a> {
    repo: String,
    editor: &'a str,
    editor_args: &'a [String],
}

/// Isolated test environment with a temporary zettel repository.
///
/// Layout inside the temp directory:
///
/// ```text
/// zet.yaml        config pointing at `zet/`
/// zet/docs/       notes directory
/// ```
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    repo: PathBuf,
    config: PathBuf,
}

impl TestEnv {
    /// Creates a repository with an empty notes directory and no git.
    ///
    /// The configured editor is `true`, which leaves files untouched.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let repo = temp_dir.path().join("zet");
        std::fs::create_dir_all(repo.join(NOTES_DIR)).expect("Failed to create notes dir");
        let config = temp_dir.path().join("zet.yaml");

        let env = Self {
            _temp_dir: temp_dir,
            repo,
            config,
        };
        env.set_editor("true", &[]);
        env
    }

    /// Creates a repository initialized with git on branch `main`.
    pub fn with_git() -> Self {
        let env = Self::new();
        env.git(&["init", "--quiet", "--initial-branch", "main"]);
        env.git(&["config", "user.name", "Zet Tester"]);
        env.git(&["config", "user.email", "tester@example.com"]);
        env.git(&["config", "commit.gpgsign", "false"]);
        env
    }

    /// Returns the repository root.
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Returns the path of the config file.
    pub fn config_path(&self) -> &Path {
        &self.config
    }

    /// Returns the temp directory holding the repository and config.
    pub fn root(&self) -> &Path {
        self._temp_dir.path()
    }

    /// Rewrites the config with a different editor.
    pub fn set_editor(&self, editor: &str, args: &[String]) {
        let yaml = serde_yaml::to_string(&ConfigYaml {
            repo: self.repo.to_string_lossy().to_string(),
            editor,
            editor_args: args,
        })
        .expect("Failed to serialize config");
        std::fs::write(&self.config, yaml).expect("Failed to write config");
    }

    /// Uses `sh -c <script>` as the editor; the file path is `$0`.
    pub fn set_editor_script(&self, script: &str) {
        self.set_editor("sh", &["-c".to_string(), script.to_string()]);
    }

    /// Writes a zettel into the notes directory and returns its path.
    pub fn add_zettel(&self, zettel: &TestZettel) -> PathBuf {
        let dir = self.zettel_dir(zettel.get_id());
        std::fs::create_dir_all(&dir).expect("Failed to create zettel dir");
        let path = dir.join(ZETTEL_FILENAME);
        std::fs::write(&path, zettel.content()).expect("Failed to write zettel");
        path
    }

    /// Creates an empty zettel folder.
    pub fn add_empty_folder(&self, id: &str) -> PathBuf {
        let dir = self.zettel_dir(id);
        std::fs::create_dir_all(&dir).expect("Failed to create folder");
        dir
    }

    /// Folder of the zettel with `id`.
    pub fn zettel_dir(&self, id: &str) -> PathBuf {
        self.repo.join(NOTES_DIR).join(id)
    }

    /// Folder names in the notes directory, sorted.
    pub fn zettel_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = std::fs::read_dir(self.repo.join(NOTES_DIR))
            .expect("Failed to read notes dir")
            .map(|entry| {
                entry
                    .expect("Failed to read entry")
                    .file_name()
                    .to_string_lossy()
                    .to_string()
            })
            .collect();
        ids.sort();
        ids
    }

    /// Stages everything and commits it.
    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "--all"]);
        self.git(&["commit", "--quiet", "-m", message]);
    }

    /// Commit subjects, newest first.
    pub fn git_log(&self) -> Vec<String> {
        self.git(&["log", "--format=%s"])
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Runs git in the repository, expects success, and returns stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("git output was not valid UTF-8")
    }

    /// Creates a ZetCommand configured for this test environment.
    pub fn cmd(&self) -> ZetCommand {
        ZetCommand::new().config(&self.config)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // TestEnv Foundation
    // ===========================================

    #[test]
    fn test_env_creates_notes_directory() {
        let env = TestEnv::new();
        assert!(env.repo().join(NOTES_DIR).is_dir());
        assert!(env.config_path().is_file());
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.repo().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_config_names_the_repo() {
        let env = TestEnv::new();
        let config = std::fs::read_to_string(env.config_path()).unwrap();
        assert!(config.contains(&*env.repo().to_string_lossy()));
        assert!(config.contains("editor: 'true'") || config.contains("editor: \"true\""));
    }

    #[test]
    fn test_env_add_zettel_creates_readme() {
        let env = TestEnv::new();
        let path = env.add_zettel(&TestZettel::new("20211016205158", "Test"));
        assert!(path.ends_with("docs/20211016205158/README.md"));
        assert_eq!(env.zettel_ids(), vec!["20211016205158"]);
    }

    #[test]
    fn test_env_with_git_commits() {
        let env = TestEnv::with_git();
        env.add_zettel(&TestZettel::new("20211016205158", "Test"));
        env.commit_all("Initial");
        assert_eq!(env.git_log(), vec!["Initial"]);
    }
}
