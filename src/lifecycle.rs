//! Adding, editing, removing and cleaning zettels.
//!
//! Every change to a note is committed right away. The editor, Git and the
//! confirmation prompt are reached through traits so the flows can be
//! exercised without a terminal.

use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{Zettel, ZettelId, parse_content};
use crate::infra::{CommitSummary, EditorError, EditorLauncher, GitError, Prompt, Vcs};
use crate::repo::{
    EmptyFolder, NOTES_DIR, RepoError, ZettelRepo, find_empty_folders, remove_empty_folder,
};

/// Prefix of commit messages produced by `edit`.
pub const EDIT_PREFIX: &str = "ED: ";

/// Prefix of commit messages produced by `rm`.
pub const REMOVE_PREFIX: &str = "RM: ";

/// Errors raised while changing zettels.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Repo(#[from] RepoError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("failed to read answer: {0}")]
    Prompt(#[source] io::Error),

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LifecycleError {
    fn io(path: &Path, source: io::Error) -> Self {
        LifecycleError::Io {
            path: path.into(),
            source,
        }
    }
}

/// How an operation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new zettel was created and committed.
    Added(ZettelId),
    /// The zettel changed and was committed, possibly folded into the
    /// previous edit commit.
    Edited { id: ZettelId, squashed: bool },
    /// The editor exited without changing the zettel.
    Unchanged(ZettelId),
    /// The zettel folder was deleted.
    Removed(ZettelId),
    /// The user backed out; nothing changed on disk or in Git.
    Aborted,
}

/// Runs add/edit/remove against one repository.
pub struct Lifecycle<'a, V: Vcs, E: EditorLauncher> {
    repo: &'a ZettelRepo,
    vcs: &'a V,
    editor: &'a E,
}

impl<'a, V: Vcs, E: EditorLauncher> Lifecycle<'a, V, E> {
    pub fn new(repo: &'a ZettelRepo, vcs: &'a V, editor: &'a E) -> Self {
        Self { repo, vcs, editor }
    }

    /// Creates a zettel with the current time as its ID.
    pub fn add(&self) -> Result<Outcome, LifecycleError> {
        self.add_at(Utc::now())
    }

    /// Creates a zettel with the ID derived from `now`.
    ///
    /// The editor is opened on an empty file. Saving nothing (or leaving the
    /// first line blank) aborts and removes the new folder. A failed commit
    /// unstages the file and removes the folder too.
    pub fn add_at(&self, now: DateTime<Utc>) -> Result<Outcome, LifecycleError> {
        let id = self.repo.next_id_at(now)?;
        let dir = self.repo.zettel_dir(&id);
        let path = self.repo.zettel_path(&id);

        std::fs::create_dir_all(&dir).map_err(|e| LifecycleError::io(&dir, e))?;
        std::fs::write(&path, "").map_err(|e| LifecycleError::io(&path, e))?;

        if let Err(e) = self.editor.open(&path) {
            discard_dir(&dir);
            return Err(e.into());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| LifecycleError::io(&path, e))?;
        let parsed = match parse_content(&content) {
            Ok(parsed) => parsed,
            Err(reason) => {
                info!("add: zettel creation aborted ({}) '{}'", reason, path.display());
                std::fs::remove_dir_all(&dir).map_err(|e| LifecycleError::io(&dir, e))?;
                return Ok(Outcome::Aborted);
            }
        };
        if parsed.malformed_title {
            warn!("wrong title formatting: {} \"{}\"", id, parsed.title);
        }

        let git_path = self.repo.git_path(&id);
        self.vcs.stage(&git_path)?;
        if let Err(e) = self.vcs.commit(&parsed.title) {
            if let Err(unstage) = self.vcs.stage_removal(&git_path) {
                warn!("failed to unstage '{}': {}", git_path, unstage);
            }
            discard_dir(&dir);
            return Err(e.into());
        }
        info!("add: zettel created '{}'", path.display());
        Ok(Outcome::Added(id))
    }

    /// Opens an existing zettel in the editor and commits the result.
    ///
    /// Emptying the file aborts and puts the previous content back. When the
    /// last commit was an edit of this same zettel, the change is amended
    /// into it instead of creating another commit.
    pub fn edit(&self, zettel: &Zettel) -> Result<Outcome, LifecycleError> {
        let path = zettel.path();
        let snapshot = std::fs::read_to_string(path).map_err(|e| LifecycleError::io(path, e))?;

        self.editor.open(path)?;

        let content = std::fs::read_to_string(path).map_err(|e| LifecycleError::io(path, e))?;
        let parsed = match parse_content(&content) {
            Ok(parsed) => parsed,
            Err(reason) => {
                info!("edit: zettel modification aborted ({}) '{}'", reason, path.display());
                restore(path, &snapshot)?;
                return Ok(Outcome::Aborted);
            }
        };

        if content == snapshot {
            return Ok(Outcome::Unchanged(zettel.id().clone()));
        }
        if parsed.malformed_title {
            warn!("wrong title formatting: {} \"{}\"", zettel.id(), parsed.title);
        }

        let git_path = self.repo.git_path(zettel.id());
        let was_tracked = self.vcs.is_tracked(&git_path)?;
        self.vcs.stage(&git_path)?;

        let last = self.vcs.last_commit()?;
        let squashed = is_edit_of(last.as_ref(), &git_path);
        if squashed {
            self.vcs.amend(&format!("{EDIT_PREFIX}{}", parsed.title))?;
        } else if was_tracked {
            self.vcs.commit(&format!("{EDIT_PREFIX}{}", parsed.title))?;
        } else {
            self.vcs.commit(&parsed.title)?;
        }

        info!("edit: zettel modified '{}' (squashed: {})", path.display(), squashed);
        Ok(Outcome::Edited {
            id: zettel.id().clone(),
            squashed,
        })
    }

    /// Deletes a zettel folder after the user answers exactly `y`.
    ///
    /// The removal is committed as `RM: <title>` if the zettel was ever
    /// committed.
    pub fn remove<P: Prompt>(
        &self,
        zettel: &Zettel,
        prompt: &mut P,
    ) -> Result<Outcome, LifecycleError> {
        let question = format!(
            "{} `{}` will be deleted including all files that might be inside. Are you sure? (y/N): ",
            zettel.id(),
            zettel.title()
        );
        if !prompt.confirm(&question).map_err(LifecycleError::Prompt)? {
            return Ok(Outcome::Aborted);
        }

        let git_dir = format!("{NOTES_DIR}/{}", zettel.id());
        let was_tracked = self.vcs.is_tracked(&git_dir)?;

        let dir = zettel.dir();
        std::fs::remove_dir_all(dir).map_err(|e| LifecycleError::io(dir, e))?;
        info!("remove: deleted folder '{}'", dir.display());

        if was_tracked {
            self.vcs.stage_removal(&git_dir)?;
            self.vcs
                .commit(&format!("{REMOVE_PREFIX}{}", zettel.title()))?;
        }
        Ok(Outcome::Removed(zettel.id().clone()))
    }
}

/// True when `last` is an edit commit that touched only `git_path`.
pub fn is_edit_of(last: Option<&CommitSummary>, git_path: &str) -> bool {
    last.is_some_and(|commit| {
        commit.subject.starts_with(EDIT_PREFIX) && commit.files == [git_path]
    })
}

/// Lists empty folders in the notes directory and deletes them when
/// `delete` is set.
pub fn clean(repo: &ZettelRepo, delete: bool) -> Result<Vec<EmptyFolder>, LifecycleError> {
    let folders = find_empty_folders(repo)?;
    if delete {
        for folder in &folders {
            remove_empty_folder(folder)?;
            info!("clean: deleted '{}'", folder.path.display());
        }
    }
    Ok(folders)
}

/// Writes `content` back to `path` through a temp file and rename.
fn restore(path: &Path, content: &str) -> Result<(), LifecycleError> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let mut temp = NamedTempFile::new_in(parent).map_err(|e| LifecycleError::io(path, e))?;
    temp.write_all(content.as_bytes())
        .map_err(|e| LifecycleError::io(path, e))?;
    temp.persist(path)
        .map_err(|e| LifecycleError::io(path, e.error))?;
    Ok(())
}

fn discard_dir(dir: &Path) {
    if let Err(e) = std::fs::remove_dir_all(dir) {
        warn!("failed to remove '{}': {}", dir.display(), e);
    }
}
