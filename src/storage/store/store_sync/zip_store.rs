//! A read-only zip archive store.

use crate::storage::{
    Bytes, ListableStorageTraits, MaybeBytes, ReadableStorageTraits, StorageError, StoreKey,
    StoreKeys, StorePrefix, WritableStorageTraits,
};

use itertools::Itertools;
use parking_lot::Mutex;
use thiserror::Error;
use zip::{result::ZipError, ZipArchive};

use std::{
    fs::File,
    io::{Cursor, Read, Seek},
    path::Path,
};

/// A read-only store backed by a zip archive.
///
/// Entry names in the archive are store keys. Directory entries are ignored.
/// The archive reader is stateful, so every call is serialised behind a single mutex.
/// Writing fails with [`StorageError::ReadOnly`].
pub struct ZipStore<R: Read + Seek + Send> {
    zip_archive: Mutex<ZipArchive<R>>,
}

impl<R: Read + Seek + Send> std::fmt::Debug for ZipStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipStore")
            .field("len", &self.zip_archive.lock().len())
            .finish()
    }
}

impl ZipStore<File> {
    /// Open a zip archive at `path` on the local filesystem.
    ///
    /// # Errors
    /// Returns a [`ZipStoreCreateError`] if the file cannot be opened or is not a valid zip archive.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ZipStoreCreateError> {
        Self::new(File::open(path)?)
    }
}

impl ZipStore<Cursor<Bytes>> {
    /// Create a zip store from an archive stored as a value at `key` in `storage`.
    ///
    /// The whole archive is read into memory.
    ///
    /// # Errors
    /// Returns a [`ZipStoreCreateError`] if the key does not exist, there is an underlying storage error, or the value is not a valid zip archive.
    pub fn from_storage<TStorage: ?Sized + ReadableStorageTraits>(
        storage: &TStorage,
        key: &StoreKey,
    ) -> Result<Self, ZipStoreCreateError> {
        let bytes = storage
            .get(key)?
            .ok_or_else(|| ZipStoreCreateError::MissingArchive(key.clone()))?;
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek + Send> ZipStore<R> {
    /// Create a zip store from a `reader` of a zip archive.
    ///
    /// # Errors
    /// Returns a [`ZipStoreCreateError`] if the archive is not valid.
    pub fn new(reader: R) -> Result<Self, ZipStoreCreateError> {
        let zip_archive = ZipArchive::new(reader)
            .map_err(|err| ZipStoreCreateError::ZipError(err.to_string()))?;
        Ok(Self {
            zip_archive: Mutex::new(zip_archive),
        })
    }
}

impl<R: Read + Seek + Send> ReadableStorageTraits for ZipStore<R> {
    fn get(&self, key: &StoreKey) -> Result<MaybeBytes, StorageError> {
        let mut zip_archive = self.zip_archive.lock();
        let mut file = match zip_archive.by_name(key.as_str()) {
            Ok(zip_file) => zip_file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(err) => return Err(StorageError::Other(err.to_string())),
        };
        if !file.is_file() {
            return Ok(None);
        }
        let mut buffer = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());
        file.read_to_end(&mut buffer)?;
        Ok(Some(buffer.into()))
    }

    fn exists(&self, key: &StoreKey) -> Result<bool, StorageError> {
        Ok(self
            .zip_archive
            .lock()
            .file_names()
            .any(|name| name == key.as_str()))
    }
}

impl<R: Read + Seek + Send> ListableStorageTraits for ZipStore<R> {
    fn list_prefix(&self, prefix: &StorePrefix) -> Result<StoreKeys, StorageError> {
        Ok(self
            .zip_archive
            .lock()
            .file_names()
            .filter(|name| !name.ends_with('/') && name.starts_with(prefix.as_str()))
            .filter_map(|name| StoreKey::try_from(name).ok())
            .sorted()
            .collect())
    }
}

impl<R: Read + Seek + Send> WritableStorageTraits for ZipStore<R> {
    fn set(&self, _key: &StoreKey, _value: Bytes) -> Result<(), StorageError> {
        Err(StorageError::ReadOnly)
    }

    fn erase(&self, _key: &StoreKey) -> Result<(), StorageError> {
        Err(StorageError::ReadOnly)
    }

    fn erase_prefix(&self, _prefix: &StorePrefix) -> Result<(), StorageError> {
        Err(StorageError::ReadOnly)
    }
}

/// A zip store creation error.
#[derive(Debug, Error)]
pub enum ZipStoreCreateError {
    /// An IO error.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    /// An existing zip archive could not be read.
    #[error("{0}")]
    ZipError(String),
    /// The archive value does not exist in the underlying storage.
    #[error("zip archive {0} does not exist")]
    MissingArchive(StoreKey),
    /// A storage error.
    #[error(transparent)]
    StorageError(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use zip::write::SimpleFileOptions;

    use crate::storage::{store::MemoryStore, store_test};

    use super::*;
    use std::{
        error::Error,
        io::{Seek, Write},
        path::PathBuf,
    };

    fn zip_dir(
        src_dir: &Path,
        writer: impl Write + Seek,
        method: zip::CompressionMethod,
    ) -> zip::result::ZipResult<()> {
        let mut zip = zip::ZipWriter::new(writer);
        let options = SimpleFileOptions::default()
            .compression_method(method)
            .unix_permissions(0o755);
        for entry in walkdir::WalkDir::new(src_dir).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            let name = path
                .strip_prefix(src_dir)
                .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?
                .to_string_lossy()
                .replace(std::path::MAIN_SEPARATOR, "/");
            if name.is_empty() {
                continue;
            }
            if path.is_file() {
                zip.start_file(name, options)?;
                zip.write_all(&std::fs::read(path)?)?;
            } else {
                zip.add_directory(name, options)?;
            }
        }
        zip.finish()?;
        Ok(())
    }

    fn zip_written_store() -> Result<(tempfile::TempDir, PathBuf), Box<dyn Error>> {
        let dir = tempfile::TempDir::new()?;
        let source = dir.path().join("source");
        let store = crate::storage::store::FilesystemStore::new(&source)?;
        store_test::store_write(&store)?;
        let path = dir.path().join("store.zip");
        zip_dir(
            &source,
            File::create(&path)?,
            zip::CompressionMethod::Stored,
        )?;
        Ok((dir, path))
    }

    #[test]
    fn zip_file() -> Result<(), Box<dyn Error>> {
        let (_dir, path) = zip_written_store()?;
        let store = ZipStore::open(path)?;
        store_test::store_read(&store)?;
        store_test::store_list(&store)?;
        Ok(())
    }

    #[test]
    fn zip_from_storage() -> Result<(), Box<dyn Error>> {
        let (_dir, path) = zip_written_store()?;
        let memory = MemoryStore::new();
        let key: StoreKey = "archive.zip".try_into()?;
        memory.set(&key, std::fs::read(path)?.into())?;
        let store = ZipStore::from_storage(&memory, &key)?;
        store_test::store_read(&store)?;
        assert!(matches!(
            ZipStore::from_storage(&memory, &"missing.zip".try_into()?),
            Err(ZipStoreCreateError::MissingArchive(_))
        ));
        Ok(())
    }

    #[test]
    fn zip_read_only() -> Result<(), Box<dyn Error>> {
        let (_dir, path) = zip_written_store()?;
        let store = ZipStore::open(path)?;
        assert!(matches!(
            store.set(&"a/b".try_into()?, vec![].into()),
            Err(StorageError::ReadOnly)
        ));
        assert!(matches!(
            store.erase(&"a/b".try_into()?),
            Err(StorageError::ReadOnly)
        ));
        assert!(matches!(
            store.erase_prefix(&StorePrefix::root()),
            Err(StorageError::ReadOnly)
        ));
        assert!(store.exists(&"a/b".try_into()?)?);
        Ok(())
    }

    #[test]
    fn zip_invalid() {
        assert!(matches!(
            ZipStore::new(Cursor::new(vec![0u8; 16])),
            Err(ZipStoreCreateError::ZipError(_))
        ));
    }
}
