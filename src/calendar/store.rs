use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::collection::CalendarCollection;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("calendar data in {} is corrupt: {source}", path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Whole-collection persistence over a single JSON file.
///
/// There is no locking: two processes writing the same file race and the
/// last writer wins.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for one user inside `data_dir`. `user_key` must already be safe
    /// to use in a file name.
    pub fn for_user(data_dir: &Path, user_key: &str) -> Self {
        Self::new(data_dir.join(format!("user_calendars_{user_key}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file written before being renamed over the real one.
    pub(crate) fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Reads the collection. A missing file is an empty collection.
    pub fn load(&self) -> Result<CalendarCollection, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no data file yet");
                return Ok(CalendarCollection::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        serde_json::from_str(&text).map_err(|source| StoreError::CorruptData {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the file with the full collection.
    pub fn save(&self, calendars: &CalendarCollection) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(calendars)
            .map_err(|e| StoreError::io(&self.path, e.into()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let staging = self.staging_path();
        fs::write(&staging, text).map_err(|e| StoreError::io(&staging, e))?;
        if let Err(e) = fs::rename(&staging, &self.path) {
            let _ = fs::remove_file(&staging);
            return Err(StoreError::io(&self.path, e));
        }

        info!(path = %self.path.display(), calendars = calendars.len(), "saved calendars");
        Ok(())
    }
}
