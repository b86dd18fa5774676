//! Detection and removal of empty folders in the notes directory.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{RepoError, ZettelRepo};

/// A folder under the notes directory that holds no files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyFolder {
    pub name: String,
    pub path: PathBuf,
}

/// Lists folders directly under the notes directory that contain no files,
/// at any depth, in ascending name order.
pub fn find_empty_folders(repo: &ZettelRepo) -> Result<Vec<EmptyFolder>, RepoError> {
    let notes_dir = repo.notes_dir();
    if !notes_dir.is_dir() {
        return Err(RepoError::MissingRoot { path: notes_dir });
    }

    let mut folders = Vec::new();
    for entry in WalkDir::new(&notes_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| RepoError::Io {
            path: notes_dir.clone(),
            source: e.into(),
        })?;
        if entry.file_type().is_dir() && holds_no_files(entry.path()) {
            folders.push(EmptyFolder {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
            });
        }
    }
    Ok(folders)
}

/// Deletes an empty folder together with its empty subfolders.
pub fn remove_empty_folder(folder: &EmptyFolder) -> Result<(), RepoError> {
    // Re-check right before deleting: remove_dir_all would take files too.
    if !holds_no_files(&folder.path) {
        return Err(RepoError::Io {
            path: folder.path.clone(),
            source: std::io::Error::other("folder is no longer empty"),
        });
    }
    std::fs::remove_dir_all(&folder.path).map_err(|e| RepoError::Io {
        path: folder.path.clone(),
        source: e,
    })
}

fn holds_no_files(dir: &Path) -> bool {
    WalkDir::new(dir)
        .into_iter()
        .all(|entry| entry.is_ok_and(|e| e.file_type().is_dir()))
}
