//! Directory-backed key-value storage.
//!
//! Each key is a `<key>.json` file in the data directory. Writes go to a
//! temporary file first and are renamed into place, so a crashed write
//! leaves the previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bella_mode_core::cart::{KeyValueStore, StorageError};

/// Key-value storage over a directory of files.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store files under `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !valid {
            return Err(StorageError::Backend(format!("invalid storage key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Backend(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let temp = path.with_extension("json.tmp");
        let backend = |e: std::io::Error| {
            StorageError::Backend(format!("failed to write {}: {e}", path.display()))
        };

        fs::create_dir_all(&self.dir).map_err(backend)?;
        fs::write(&temp, value).map_err(backend)?;
        fs::rename(&temp, &path).map_err(backend)?;
        tracing::debug!(path = %path.display(), bytes = value.len(), "storage written");
        Ok(())
    }
}
