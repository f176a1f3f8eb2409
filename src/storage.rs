//! Zarr storage ([stores](store) and [storage adapters](storage_adapter)).
//!
//! A store is an opaque, byte-oriented key-value namespace with listing by prefix.
//! Every backend implements the same interface, split into [`ReadableStorageTraits`], [`WritableStorageTraits`], and [`ListableStorageTraits`].
//!
//! Included stores:
//!  - [`MemoryStore`](store::MemoryStore): an in-memory store.
//!  - [`FilesystemStore`](store::FilesystemStore): a store in a directory of a local filesystem.
//!  - `ZipStore` (feature `zip`): a read-only store backed by a zip archive.
//!
//! Included storage adapters:
//!  - [`CachingStore`](storage_adapter::CachingStore): a least recently used cache in front of any store.
//!  - [`UsageLogStorageAdapter`](storage_adapter::UsageLogStorageAdapter): logs every storage call.
//!
//! This module also has functions for deriving metadata and chunk keys from node paths.

pub mod storage_adapter;
mod storage_sync;
pub mod store;
mod store_key;
mod store_prefix;

#[cfg(test)]
pub(crate) mod store_test;

use std::sync::Arc;

use thiserror::Error;

use crate::{array::ChunkKeyEncoding, node::NodePath};

pub use store_key::{StoreKey, StoreKeyError, StoreKeys};
pub use store_prefix::{StorePrefix, StorePrefixError};

pub use self::storage_sync::{
    erase_chunk, node_exists, retrieve_chunk, store_chunk, store_metadata, ListableStorageTraits,
    ReadableListableStorageTraits, ReadableStorageTraits, ReadableWritableListableStorageTraits,
    ReadableWritableStorageTraits, WritableStorageTraits,
};

/// The type for bytes used in store get and set methods.
pub type Bytes = bytes::Bytes;

/// An alias for bytes which may or may not be available.
pub type MaybeBytes = Option<Bytes>;

/// [`Arc`] wrapped readable storage.
pub type ReadableStorage = Arc<dyn ReadableStorageTraits>;

/// [`Arc`] wrapped writable storage.
pub type WritableStorage = Arc<dyn WritableStorageTraits>;

/// [`Arc`] wrapped listable storage.
pub type ListableStorage = Arc<dyn ListableStorageTraits>;

/// [`Arc`] wrapped readable and writable storage.
pub type ReadableWritableStorage = Arc<dyn ReadableWritableStorageTraits>;

/// [`Arc`] wrapped readable and listable storage.
pub type ReadableListableStorage = Arc<dyn ReadableListableStorageTraits>;

/// [`Arc`] wrapped readable, writable, and listable storage.
pub type ReadableWritableListableStorage = Arc<dyn ReadableWritableListableStorageTraits>;

/// The name of the metadata document of a group or array.
pub const METADATA_FILE_NAME: &str = "zarr.json";

/// A storage error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A write operation was attempted on a read only store.
    #[error("a write operation was attempted on a read only store")]
    ReadOnly,
    /// An IO error.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    /// An error parsing the metadata for a key.
    #[error("error parsing metadata for {0}: {1}")]
    InvalidMetadata(StoreKey, String),
    /// An invalid store prefix.
    #[error("invalid store prefix {0}")]
    InvalidStorePrefix(#[from] StorePrefixError),
    /// An invalid store key.
    #[error("invalid store key {0}")]
    InvalidStoreKey(#[from] StoreKeyError),
    /// The requested method is not supported.
    #[error("{0}")]
    Unsupported(String),
    /// Any other error.
    #[error("{0}")]
    Other(String),
}

impl From<&str> for StorageError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<String> for StorageError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

/// Return the metadata key (`zarr.json`) given a node path.
///
/// The root node metadata key is `zarr.json`, otherwise it is `<path>/zarr.json` without the leading `/`.
#[must_use]
pub fn meta_key(path: &NodePath) -> StoreKey {
    let path = path.as_str();
    if path.eq("/") {
        StoreKey::new_unchecked(METADATA_FILE_NAME)
    } else {
        let path = path.strip_prefix('/').unwrap_or(path);
        StoreKey::new_unchecked(format!("{path}/{METADATA_FILE_NAME}"))
    }
}

/// Return the data key given a node path, chunk grid indices, and a chunk key encoding.
#[must_use]
pub fn data_key(
    path: &NodePath,
    chunk_grid_indices: &[u64],
    chunk_key_encoding: &ChunkKeyEncoding,
) -> StoreKey {
    let prefix = StorePrefix::from(path);
    let chunk_key = chunk_key_encoding.encode(chunk_grid_indices);
    StoreKey::new_unchecked(format!("{}{}", prefix.as_str(), chunk_key.as_str()))
}

#[cfg(test)]
mod tests {
    use crate::array::chunk_key_encoding::DefaultChunkKeyEncoding;

    use super::*;

    #[test]
    fn meta_keys() {
        assert_eq!(meta_key(&NodePath::root()).as_str(), "zarr.json");
        assert_eq!(
            meta_key(&NodePath::new("/level1/data").unwrap()).as_str(),
            "level1/data/zarr.json"
        );
    }

    #[test]
    fn data_keys() {
        let encoding: ChunkKeyEncoding = DefaultChunkKeyEncoding::new_slash().into();
        assert_eq!(
            data_key(&NodePath::new("/level1/data").unwrap(), &[1, 2], &encoding).as_str(),
            "level1/data/c/1/2"
        );
        let encoding: ChunkKeyEncoding = DefaultChunkKeyEncoding::new_dot().into();
        assert_eq!(
            data_key(&NodePath::root(), &[1, 2], &encoding).as_str(),
            "c.1.2"
        );
    }

    #[test]
    fn storage_error_from_string() {
        let err: StorageError = "oops".into();
        assert_eq!(err.to_string(), "oops");
        assert!(matches!(
            StorageError::from(StoreKey::new("a/").unwrap_err()),
            StorageError::InvalidStoreKey(_)
        ));
    }
}
