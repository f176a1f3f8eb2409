//! A filesystem store.
//!
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/stores/filesystem/v1.0.html>.

use crate::storage::{
    Bytes, ListableStorageTraits, MaybeBytes, ReadableStorageTraits, StorageError, StoreKey,
    StoreKeyError, StoreKeys, StorePrefix, WritableStorageTraits,
};

use thiserror::Error;
use walkdir::WalkDir;

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

/// A synchronous file system store.
///
/// Each key is a file at the same relative path under the base directory.
/// There is no in-process locking: concurrent writers to the same key race at the filesystem level and the last writer wins.
#[derive(Debug)]
pub struct FilesystemStore {
    base_path: PathBuf,
    readonly: bool,
}

impl FilesystemStore {
    /// Create a new file system store at a given `base_path`.
    ///
    /// The base directory is not created until the first write.
    ///
    /// # Errors
    /// Returns a [`FilesystemStoreCreateError`] if `base_directory`:
    ///   - is not valid, or
    ///   - it points to an existing file rather than a directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, FilesystemStoreCreateError> {
        let base_path = base_path.as_ref().to_path_buf();
        if base_path.to_str().is_none() || base_path.is_file() {
            return Err(FilesystemStoreCreateError::InvalidBasePath(base_path));
        }

        let readonly = if base_path.exists() {
            // the path already exists, check if it is read only
            let md = std::fs::metadata(&base_path).map_err(FilesystemStoreCreateError::IOError)?;
            md.permissions().readonly()
        } else {
            // the path does not exist, so try and create it. If this succeeds, the filesystem is not read only
            std::fs::create_dir_all(&base_path).map_err(FilesystemStoreCreateError::IOError)?;
            std::fs::remove_dir(&base_path)?;
            false
        };

        Ok(Self {
            base_path,
            readonly,
        })
    }

    /// Returns the base path of the store.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns true if the base directory is read only.
    #[must_use]
    pub const fn readonly(&self) -> bool {
        self.readonly
    }

    /// Maps a [`StoreKey`] to a filesystem [`PathBuf`].
    #[must_use]
    pub fn key_to_fspath(&self, key: &StoreKey) -> PathBuf {
        let mut path = self.base_path.clone();
        path.extend(key.as_str().split('/'));
        path
    }

    /// Maps a store [`StorePrefix`] to a filesystem [`PathBuf`].
    #[must_use]
    pub fn prefix_to_fs_path(&self, prefix: &StorePrefix) -> PathBuf {
        let mut path = self.base_path.clone();
        path.extend(prefix.as_str().split('/').filter(|segment| !segment.is_empty()));
        path
    }

    /// Maps a filesystem [`PathBuf`] to a [`StoreKey`].
    fn fspath_to_key(&self, path: &Path) -> Result<StoreKey, StoreKeyError> {
        let path = pathdiff::diff_paths(path, &self.base_path)
            .ok_or_else(|| StoreKeyError::from(path.to_string_lossy().to_string()))?;
        let path_str = path
            .to_string_lossy()
            .replace(std::path::MAIN_SEPARATOR, "/");
        StoreKey::new(path_str)
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.readonly {
            Err(StorageError::ReadOnly)
        } else {
            Ok(())
        }
    }
}

fn ignore_not_found(result: std::io::Result<()>) -> Result<(), StorageError> {
    match result {
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
        _ => Ok(()),
    }
}

impl ReadableStorageTraits for FilesystemStore {
    fn get(&self, key: &StoreKey) -> Result<MaybeBytes, StorageError> {
        match std::fs::read(self.key_to_fspath(key)) {
            Ok(bytes) => Ok(Some(bytes.into())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn exists(&self, key: &StoreKey) -> Result<bool, StorageError> {
        Ok(self.key_to_fspath(key).is_file())
    }
}

impl WritableStorageTraits for FilesystemStore {
    fn set(&self, key: &StoreKey, value: Bytes) -> Result<(), StorageError> {
        self.check_writable()?;

        // Create directories
        let key_path = self.key_to_fspath(key);
        if let Some(parent) = key_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(key_path)?;
        file.write_all(&value)?;
        file.sync_all()?;

        Ok(())
    }

    fn erase(&self, key: &StoreKey) -> Result<(), StorageError> {
        self.check_writable()?;
        ignore_not_found(std::fs::remove_file(self.key_to_fspath(key)))
    }

    fn erase_prefix(&self, prefix: &StorePrefix) -> Result<(), StorageError> {
        self.check_writable()?;
        let prefix_path = self.prefix_to_fs_path(prefix);
        if prefix == &StorePrefix::root() {
            // keep the base directory itself
            if let Ok(entries) = std::fs::read_dir(&prefix_path) {
                for entry in entries {
                    let path = entry?.path();
                    if path.is_dir() {
                        ignore_not_found(std::fs::remove_dir_all(path))?;
                    } else {
                        ignore_not_found(std::fs::remove_file(path))?;
                    }
                }
            }
            Ok(())
        } else {
            ignore_not_found(std::fs::remove_dir_all(prefix_path))
        }
    }
}

impl ListableStorageTraits for FilesystemStore {
    fn list_prefix(&self, prefix: &StorePrefix) -> Result<StoreKeys, StorageError> {
        let prefix_path = self.prefix_to_fs_path(prefix);
        if !prefix_path.is_dir() {
            return Ok(vec![]);
        }
        let mut keys: StoreKeys = WalkDir::new(prefix_path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|v| v.file_type().is_file())
            .filter_map(|v| self.fspath_to_key(v.path()).ok())
            .collect();
        // walk order sorts per path component, which differs from key order when names share a stem
        keys.sort();
        Ok(keys)
    }
}

/// A filesystem store creation error.
#[derive(Debug, Error)]
pub enum FilesystemStoreCreateError {
    /// An IO error.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    /// The path is not valid on this system.
    #[error("base path {0} is not valid")]
    InvalidBasePath(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::store_test;
    use std::error::Error;

    #[test]
    fn filesystem() -> Result<(), Box<dyn Error>> {
        let path = tempfile::TempDir::new()?;
        let store = FilesystemStore::new(path.path())?;
        store_test::store_write(&store)?;
        store_test::store_read(&store)?;
        store_test::store_list(&store)?;
        Ok(())
    }

    #[test]
    fn filesystem_layout() -> Result<(), Box<dyn Error>> {
        let path = tempfile::TempDir::new()?;
        let store = FilesystemStore::new(path.path().join("nested"))?;
        assert!(!store.readonly());
        assert!(store.list()?.is_empty());
        store.set(&"group/array/c/0/1".try_into()?, vec![1, 2].into())?;
        assert_eq!(
            std::fs::read(path.path().join("nested/group/array/c/0/1"))?,
            vec![1, 2]
        );
        assert_eq!(store.list()?, &["group/array/c/0/1".try_into()?]);
        Ok(())
    }

    #[test]
    fn filesystem_base_path_is_file() -> Result<(), Box<dyn Error>> {
        let file = tempfile::NamedTempFile::new()?;
        assert!(matches!(
            FilesystemStore::new(file.path()),
            Err(FilesystemStoreCreateError::InvalidBasePath(_))
        ));
        Ok(())
    }
}
