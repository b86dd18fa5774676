//! Launching the user's text editor.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Errors from launching the editor.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("editor '{editor}' cannot be found")]
    NotFound { editor: String },

    #[error("cannot open {} with {editor}: {source}", .path.display())]
    Launch {
        editor: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("editor '{editor}' exited with non-zero status")]
    Failed { editor: String },
}

/// Opens a file for editing and blocks until the user is done.
///
/// Allows swapping the real editor for a scripted one in tests.
pub trait EditorLauncher {
    fn open(&self, path: &Path) -> Result<(), EditorError>;
}

/// Editor started as `<editor> <editor_args...> <path>`.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    editor: String,
    args: Vec<String>,
}

impl ExternalEditor {
    pub fn new(editor: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            editor: editor.into(),
            args,
        }
    }

    /// The editor executable with a leading `~` expanded.
    fn program(&self) -> PathBuf {
        super::expand_tilde(&self.editor)
    }
}

impl EditorLauncher for ExternalEditor {
    fn open(&self, path: &Path) -> Result<(), EditorError> {
        let program = self.program();
        debug!(
            "editor: {} {} {}",
            program.display(),
            self.args.join(" "),
            path.display()
        );

        let status = Command::new(&program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => EditorError::NotFound {
                    editor: program.display().to_string(),
                },
                _ => EditorError::Launch {
                    editor: self.editor.clone(),
                    path: path.into(),
                    source: e,
                },
            })?;

        if !status.success() {
            return Err(EditorError::Failed {
                editor: self.editor.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn editor_writes_through_script() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("note.md");
        let editor = ExternalEditor::new(
            "sh",
            vec!["-c".into(), "printf 'Hello World!\\n' > \"$0\"".into()],
        );

        editor.open(&file).unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "Hello World!\n");
    }

    #[test]
    fn missing_editor_is_reported() {
        let dir = TempDir::new().unwrap();
        let editor = ExternalEditor::new("not-vim-at-all", Vec::new());
        let err = editor.open(&dir.path().join("x.md")).unwrap_err();
        assert_eq!(err.to_string(), "editor 'not-vim-at-all' cannot be found");
    }

    #[test]
    fn failing_editor_is_an_error() {
        let dir = TempDir::new().unwrap();
        let editor = ExternalEditor::new("sh", vec!["-c".into(), "exit 3".into()]);
        let err = editor.open(&dir.path().join("x.md")).unwrap_err();
        assert!(matches!(err, EditorError::Failed { .. }));
    }
}
