//! Configuration file support.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::infra::{ExternalEditor, expand_tilde};

/// Name of the config file.
pub const CONFIG_FILE: &str = "zet.yaml";

/// Editor used when the config file does not name one.
#[cfg(windows)]
pub const DEFAULT_EDITOR: &str = "C:/Program Files/Git/usr/bin/vim.exe";

/// Editor used when the config file does not name one.
#[cfg(not(windows))]
pub const DEFAULT_EDITOR: &str = "/usr/bin/vim";

/// Config file contents as written by the user.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    /// Zettelkasten repository
    pub repo: Option<String>,

    /// Editor executable
    pub editor: Option<String>,

    /// Extra arguments put before the file path
    pub editor_args: Option<Vec<String>>,
}

impl ConfigFile {
    /// Parses YAML; an empty file yields no settings.
    pub fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub repo: PathBuf,
    pub editor: String,
    pub editor_args: Vec<String>,
}

impl Config {
    /// Loads the config file and applies the CLI overrides.
    ///
    /// The file may be missing only when `repo_override` is given.
    pub fn load(config_path: Option<&Path>, repo_override: Option<&Path>) -> Result<Self> {
        let path = config_path.map_or_else(Self::default_path, Path::to_path_buf);

        let file = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file: {}", path.display()))?;
            ConfigFile::parse(&contents)
                .with_context(|| format!("failed to parse config file: {}", path.display()))?
        } else if repo_override.is_some() {
            ConfigFile::default()
        } else {
            bail!(
                "config file at '{}' not found.\nAdd it or use '--config' flag.",
                path.display()
            );
        };

        Self::resolve(file, repo_override, &path)
    }

    /// Combines file settings with overrides and defaults.
    ///
    /// Precedence for the repository:
    /// 1. CLI `--repo` argument
    /// 2. Config file `repo` setting, with `~` expanded
    pub fn resolve(file: ConfigFile, repo_override: Option<&Path>, path: &Path) -> Result<Self> {
        let repo = match (repo_override, file.repo) {
            (Some(repo), _) => repo.to_path_buf(),
            (None, Some(repo)) => expand_tilde(&repo),
            (None, None) => bail!("field 'repo' missing from '{}'.", path.display()),
        };

        Ok(Self {
            repo,
            editor: file.editor.unwrap_or_else(|| DEFAULT_EDITOR.to_string()),
            editor_args: file.editor_args.unwrap_or_default(),
        })
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/zet/zet.yaml` on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("zet")
            .join(CONFIG_FILE)
    }

    /// Fails unless the repository folder exists.
    pub fn ensure_repo(&self) -> Result<()> {
        if !self.repo.is_dir() {
            bail!(
                "wrong repo path. Run 'zet init' to create a git repo at '{}', or use '--repo' flag.",
                self.repo.display()
            );
        }
        Ok(())
    }

    /// The configured editor.
    pub fn editor(&self) -> ExternalEditor {
        ExternalEditor::new(self.editor.clone(), self.editor_args.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn full_config_is_read() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "repo: /tmp/zet\neditor: /usr/bin/nvim\neditor_args: ['-c', 'set tw=72']\n",
        );

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(
            config,
            Config {
                repo: PathBuf::from("/tmp/zet"),
                editor: "/usr/bin/nvim".into(),
                editor_args: vec!["-c".into(), "set tw=72".into()],
            }
        );
    }

    #[test]
    fn editor_defaults_apply() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "repo: /tmp/zet\n");

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.editor, DEFAULT_EDITOR);
        assert!(config.editor_args.is_empty());
    }

    #[test]
    fn repo_override_wins() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "repo: /tmp/zet\n");

        let config = Config::load(Some(&path), Some(Path::new("/other/zet"))).unwrap();
        assert_eq!(config.repo, PathBuf::from("/other/zet"));
    }

    #[test]
    fn missing_file_is_an_error_without_repo_override() {
        let err = Config::load(Some(Path::new("some/nonexistent/path")), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "config file at 'some/nonexistent/path' not found.\nAdd it or use '--config' flag."
        );
    }

    #[test]
    fn missing_file_is_fine_with_repo_override() {
        let config = Config::load(
            Some(Path::new("some/nonexistent/path")),
            Some(Path::new("/tmp/zet")),
        )
        .unwrap();
        assert_eq!(config.repo, PathBuf::from("/tmp/zet"));
        assert_eq!(config.editor, DEFAULT_EDITOR);
    }

    #[test]
    fn missing_repo_field_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "editor: /usr/bin/vim\n");

        let err = Config::load(Some(&path), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("field 'repo' missing from '{}'.", path.display())
        );
    }

    #[test]
    fn empty_file_lacks_repo() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().starts_with("field 'repo' missing"));
    }

    #[test]
    fn invalid_yaml_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "repo: [unclosed\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse config file"));
    }

    #[test]
    fn tilde_in_repo_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let config = Config::resolve(
            ConfigFile {
                repo: Some("~/zet".into()),
                ..Default::default()
            },
            None,
            Path::new(CONFIG_FILE),
        )
        .unwrap();
        assert_eq!(config.repo, home.join("zet"));
    }

    #[test]
    fn ensure_repo_rejects_missing_folder() {
        let config = Config {
            repo: PathBuf::from("/nonexistent/zet/repo"),
            editor: DEFAULT_EDITOR.into(),
            editor_args: Vec::new(),
        };
        let err = config.ensure_repo().unwrap_err();
        assert!(err.to_string().starts_with("wrong repo path"));
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::default_path();
        assert!(path.ends_with("zet/zet.yaml"));
    }
}
