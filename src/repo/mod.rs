//! On-disk zettel repository: `<root>/docs/<id>/README.md`.

mod clean;

pub use clean::{EmptyFolder, find_empty_folders, remove_empty_folder};

use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::{ParseZettelError, TagIndex, Zettel, ZettelId};

/// Folder inside the repository that holds all zettels.
pub const NOTES_DIR: &str = "docs";

/// Name of the note file inside each zettel folder.
pub const ZETTEL_FILENAME: &str = "README.md";

/// Errors raised while reading the repository.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("folder {path} doesn't exist")]
    MissingRoot { path: PathBuf },

    #[error("zettel '{id}' doesn't exist")]
    NotFound { id: ZettelId },

    #[error("zettel '{id}' is empty")]
    EmptyZettel { id: ZettelId },

    #[error("zettel '{id}' is not valid UTF-8")]
    NotUtf8 { id: ZettelId },

    #[error("there are no zettels at given repo")]
    NoZettels,

    #[error("zettel '{id}' already exists, try again in a second")]
    IdCollision { id: ZettelId },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RepoError {
    fn io(path: &Path, source: io::Error) -> Self {
        RepoError::Io {
            path: path.into(),
            source,
        }
    }
}

/// One folder found while scanning the notes directory.
#[derive(Debug)]
pub enum Entry {
    /// A readable zettel.
    Zettel(Zettel),
    /// A zettel folder whose note file is missing or has no usable content.
    Empty(ZettelId),
    /// A zettel folder whose note file is not valid UTF-8.
    NotUtf8(ZettelId),
}

/// Handle on a zettel repository.
///
/// Nothing is cached: every call reads the directory tree again.
#[derive(Debug, Clone)]
pub struct ZettelRepo {
    root: PathBuf,
}

impl ZettelRepo {
    /// Opens the repository at `root`, which must be an existing folder.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, RepoError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(RepoError::MissingRoot { path: root });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder holding every zettel folder.
    pub fn notes_dir(&self) -> PathBuf {
        self.root.join(NOTES_DIR)
    }

    /// Folder of the zettel with `id`.
    pub fn zettel_dir(&self, id: &ZettelId) -> PathBuf {
        self.notes_dir().join(id.as_str())
    }

    /// Note file of the zettel with `id`.
    pub fn zettel_path(&self, id: &ZettelId) -> PathBuf {
        self.zettel_dir(id).join(ZETTEL_FILENAME)
    }

    /// Lazily scans the notes directory in ascending ID order.
    ///
    /// Folders whose name is not a zettel ID are skipped.
    pub fn scan(&self) -> Result<impl Iterator<Item = Result<Entry, RepoError>> + '_, RepoError> {
        let notes_dir = self.notes_dir();
        if !notes_dir.is_dir() {
            return Err(RepoError::MissingRoot { path: notes_dir });
        }

        let iter = WalkDir::new(&notes_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("scan: skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy();
                match name.parse::<ZettelId>() {
                    Ok(id) => Some(id),
                    Err(e) => {
                        debug!("scan: skipping '{}': {}", entry.path().display(), e);
                        None
                    }
                }
            })
            .map(|id| self.load(id));
        Ok(iter)
    }

    /// Lazily yields readable zettels in ascending ID order.
    ///
    /// Each empty or undecodable zettel folder is reported once with a
    /// warning and skipped.
    pub fn zettels(&self) -> Result<impl Iterator<Item = Result<Zettel, RepoError>> + '_, RepoError> {
        Ok(self.scan()?.filter_map(|entry| match entry {
            Ok(Entry::Zettel(zettel)) => Some(Ok(zettel)),
            Ok(Entry::Empty(id)) => {
                warn!("empty zettel folder '{}' detected", id);
                None
            }
            Ok(Entry::NotUtf8(id)) => {
                warn!("zettel '{}' is not valid UTF-8, skipping", id);
                None
            }
            Err(e) => Some(Err(e)),
        }))
    }

    /// Returns every readable zettel in ascending ID order.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::NoZettels`] when nothing readable is left.
    pub fn list_all(&self) -> Result<Vec<Zettel>, RepoError> {
        let zettels = self.zettels()?.collect::<Result<Vec<_>, _>>()?;
        if zettels.is_empty() {
            return Err(RepoError::NoZettels);
        }
        Ok(zettels)
    }

    /// Looks up one zettel by exact ID.
    pub fn get(&self, id: &ZettelId) -> Result<Zettel, RepoError> {
        if !self.zettel_path(id).is_file() {
            return Err(RepoError::NotFound { id: id.clone() });
        }
        match self.load(id.clone())? {
            Entry::Zettel(zettel) => Ok(zettel),
            Entry::Empty(id) => Err(RepoError::EmptyZettel { id }),
            Entry::NotUtf8(id) => Err(RepoError::NotUtf8 { id }),
        }
    }

    /// Returns the zettel with the highest ID.
    pub fn latest(&self) -> Result<Zettel, RepoError> {
        self.list_all()?.pop().ok_or(RepoError::NoZettels)
    }

    /// Returns the ID for a zettel created now.
    pub fn next_id(&self) -> Result<ZettelId, RepoError> {
        self.next_id_at(Utc::now())
    }

    /// Returns the ID for a zettel created at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::IdCollision`] when a folder with that ID exists.
    pub fn next_id_at(&self, now: DateTime<Utc>) -> Result<ZettelId, RepoError> {
        let id = ZettelId::from_datetime(now);
        if self.zettel_dir(&id).exists() {
            return Err(RepoError::IdCollision { id });
        }
        Ok(id)
    }

    /// Counts tags across all readable zettels.
    pub fn tag_index(&self) -> Result<TagIndex, RepoError> {
        Ok(TagIndex::build(&self.list_all()?))
    }

    /// Path of a zettel file relative to the repository root, with `/`
    /// separators, as Git reports it.
    pub fn git_path(&self, id: &ZettelId) -> String {
        format!("{NOTES_DIR}/{id}/{ZETTEL_FILENAME}")
    }

    /// Extracts the zettel ID from a path such as `docs/<id>/README.md`.
    pub fn id_from_git_path(path: &str) -> Option<ZettelId> {
        let mut parts = path.trim().rsplit('/');
        let file = parts.next()?;
        if file != ZETTEL_FILENAME {
            return None;
        }
        parts.next()?.parse().ok()
    }

    fn load(&self, id: ZettelId) -> Result<Entry, RepoError> {
        let path = self.zettel_path(&id);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Entry::Empty(id)),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => return Ok(Entry::NotUtf8(id)),
            Err(e) => return Err(RepoError::io(&path, e)),
        };

        match Zettel::from_content(id.clone(), path, content) {
            Ok((zettel, parsed)) => {
                if parsed.malformed_title {
                    warn!("wrong title formatting: {} \"{}\"", id, zettel.title());
                }
                debug!("scan: found {:?}", zettel.id());
                Ok(Entry::Zettel(zettel))
            }
            Err(ParseZettelError::Empty | ParseZettelError::EmptyTitle) => Ok(Entry::Empty(id)),
        }
    }
}
