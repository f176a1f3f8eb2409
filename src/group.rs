//! Zarr groups.
//!
//! A Zarr group is a node in a Zarr hierarchy.
//! It can have associated metadata and may have child nodes (groups or [`arrays`](crate::array)).
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#group>.
//!
//! Use [`Group::create`] to write a new group, or use [`Group::open`] to read an existing group.
//!
//! A group can optionally store attributes in metadata in an accompanying `zarr.json` file. For example:
//! ```json
//! {
//!     "zarr_format": 3,
//!     "node_type": "group",
//!     "attributes": {
//!         "spam": "ham",
//!         "eggs": 42,
//!     }
//! }
//! ```
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#group-metadata> for more information on group metadata.

use std::sync::Arc;

use itertools::Itertools;
use thiserror::Error;

use crate::{
    metadata::{GroupMetadata, NodeMetadata},
    node::{NodePath, NodePathError},
    storage::{
        meta_key, ListableStorageTraits, ReadableStorageTraits, StorageError, StorePrefix,
        WritableStorageTraits, METADATA_FILE_NAME,
    },
};

/// A group.
#[derive(Clone, Debug)]
pub struct Group<TStorage: ?Sized> {
    /// The storage.
    storage: Arc<TStorage>,
    /// The path of the group in the store.
    path: NodePath,
    /// The metadata.
    metadata: GroupMetadata,
}

impl<TStorage: ?Sized> Group<TStorage> {
    /// Create a group in `storage` at `path` with `metadata`.
    /// This does **not** write to the store, use [`store_metadata`](Group::store_metadata) to write `metadata` to `storage`.
    ///
    /// # Errors
    ///
    /// Returns [`GroupCreateError`] if any metadata is invalid.
    pub fn new_with_metadata(
        storage: Arc<TStorage>,
        path: &str,
        metadata: GroupMetadata,
    ) -> Result<Self, GroupCreateError> {
        let path = NodePath::new(path)?;
        validate_group_metadata(&metadata)?;
        Ok(Self {
            storage,
            path,
            metadata,
        })
    }

    /// Get path.
    #[must_use]
    pub const fn path(&self) -> &NodePath {
        &self.path
    }

    /// Get attributes.
    #[must_use]
    pub const fn attributes(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        self.metadata.attributes.as_ref()
    }

    /// Get metadata.
    #[must_use]
    pub const fn metadata(&self) -> &GroupMetadata {
        &self.metadata
    }

    /// Get the underlying storage backing the group.
    #[must_use]
    pub fn storage(&self) -> Arc<TStorage> {
        self.storage.clone()
    }
}

impl<TStorage: ?Sized + ReadableStorageTraits> Group<TStorage> {
    /// Open an existing group in `storage` at `path`. The metadata is read from the store.
    ///
    /// # Errors
    ///
    /// Returns [`GroupCreateError`] if there is no metadata at `path`, there is a storage error, or the metadata is invalid or describes an array.
    pub fn open(storage: Arc<TStorage>, path: &str) -> Result<Self, GroupCreateError> {
        let node_path = NodePath::new(path)?;
        let metadata = storage
            .get(&meta_key(&node_path))?
            .ok_or_else(|| GroupCreateError::MissingMetadata(node_path.clone()))?;
        let metadata = match serde_json::from_slice(&metadata)? {
            NodeMetadata::Group(metadata) => metadata,
            NodeMetadata::Array(metadata) => {
                return Err(GroupCreateError::InvalidNodeType(metadata.node_type));
            }
        };
        log::debug!("opened group {node_path}");
        Self::new_with_metadata(storage, path, metadata)
    }
}

impl<TStorage: ?Sized + ListableStorageTraits> Group<TStorage> {
    /// Return the names of the immediate children of the group, sorted.
    ///
    /// Every key under the group is reduced to its first path segment below the group.
    /// The group's own `zarr.json` is not a child.
    /// Children are not checked for metadata, so any directory holding keys is listed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if there is an underlying store error.
    pub fn list_children(&self) -> Result<Vec<String>, StorageError> {
        let prefix = StorePrefix::from(self.path());
        let keys = self.storage.list_prefix(&prefix)?;
        Ok(keys
            .iter()
            .filter_map(|key| key.as_str().strip_prefix(prefix.as_str()))
            .filter_map(|relative| relative.split('/').next())
            .filter(|name| !name.is_empty() && *name != METADATA_FILE_NAME)
            .sorted()
            .dedup()
            .map(ToString::to_string)
            .collect())
    }

    /// Return the paths of the immediate children of the group, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if there is an underlying store error.
    pub fn child_paths(&self) -> Result<Vec<NodePath>, StorageError> {
        self.list_children()?
            .iter()
            .map(|name| {
                self.path
                    .child(name)
                    .map_err(|err| StorageError::Other(err.to_string()))
            })
            .collect()
    }
}

impl<TStorage: ?Sized + WritableStorageTraits> Group<TStorage> {
    /// Create a group in `storage` at `path` with `metadata` and write the metadata to the store.
    ///
    /// An existing node at `path` is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`GroupCreateError`] if the metadata is invalid or it cannot be written.
    pub fn create(
        storage: Arc<TStorage>,
        path: &str,
        metadata: GroupMetadata,
    ) -> Result<Self, GroupCreateError> {
        let group = Self::new_with_metadata(storage, path, metadata)?;
        group.store_metadata()?;
        log::debug!("created group {}", group.path());
        Ok(group)
    }

    /// Store metadata.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if there is an underlying store error.
    pub fn store_metadata(&self) -> Result<(), StorageError> {
        crate::storage::store_metadata(&*self.storage, self.path(), &self.metadata)
    }
}

/// A group creation error.
#[derive(Debug, Error)]
pub enum GroupCreateError {
    /// Invalid zarr format.
    #[error("invalid zarr format {0}, expected 3")]
    InvalidZarrFormat(usize),
    /// Invalid node type.
    #[error("invalid node type {0}, expected group")]
    InvalidNodeType(String),
    /// An invalid node path
    #[error(transparent)]
    NodePathError(#[from] NodePathError),
    /// There is no metadata at the node path.
    #[error("group metadata is missing at {0}")]
    MissingMetadata(NodePath),
    /// Storage error.
    #[error(transparent)]
    StorageError(#[from] StorageError),
    /// An error deserializing the metadata.
    #[error(transparent)]
    MetadataDeserializationError(#[from] serde_json::Error),
}

fn validate_group_metadata(metadata: &GroupMetadata) -> Result<(), GroupCreateError> {
    if !metadata.validate_format() {
        Err(GroupCreateError::InvalidZarrFormat(metadata.zarr_format))
    } else if !metadata.validate_node_type() {
        Err(GroupCreateError::InvalidNodeType(
            metadata.node_type.clone(),
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use crate::storage::store::MemoryStore;

    use super::*;

    const JSON_VALID1: &str = r#"{
    "zarr_format": 3,
    "node_type": "group",
    "attributes": {
        "spam": "ham",
        "eggs": 42
    }
}"#;

    #[test]
    fn group_metadata1() {
        let group_metadata: GroupMetadata = serde_json::from_str(JSON_VALID1).unwrap();
        let store = Arc::new(MemoryStore::new());
        let group = Group::new_with_metadata(store, "/", group_metadata).unwrap();
        assert_eq!(
            group.attributes().and_then(|a| a.get("eggs")),
            Some(&serde_json::Value::from(42))
        );
    }

    #[test]
    fn group_metadata_invalid_format() {
        let json = r#"{"zarr_format": 2, "node_type": "group"}"#;
        let group_metadata: GroupMetadata = serde_json::from_str(json).unwrap();
        let store = Arc::new(MemoryStore::new());
        assert!(matches!(
            Group::new_with_metadata(store, "/", group_metadata),
            Err(GroupCreateError::InvalidZarrFormat(2))
        ));
    }

    #[test]
    fn group_metadata_invalid_type() {
        let json = r#"{"zarr_format": 3, "node_type": "array"}"#;
        let group_metadata: GroupMetadata = serde_json::from_str(json).unwrap();
        let store = Arc::new(MemoryStore::new());
        let err = Group::new_with_metadata(store, "/", group_metadata).unwrap_err();
        assert_eq!(err.to_string(), "invalid node type array, expected group");
    }

    #[test]
    fn group_create_open() -> Result<(), Box<dyn Error>> {
        let store = Arc::new(MemoryStore::new());
        let metadata: GroupMetadata = serde_json::from_str(JSON_VALID1)?;
        Group::create(store.clone(), "/group", metadata.clone())?;
        let group = Group::open(store.clone(), "/group")?;
        assert_eq!(group.metadata(), &metadata);
        assert!(matches!(
            Group::open(store, "/missing"),
            Err(GroupCreateError::MissingMetadata(_))
        ));
        Ok(())
    }

    #[test]
    fn group_list_children() -> Result<(), Box<dyn Error>> {
        let store = Arc::new(MemoryStore::new());
        let root = Group::create(store.clone(), "", GroupMetadata::default())?;
        let b = Group::create(store.clone(), "b", GroupMetadata::default())?;
        store.set(&"b/c/d/e".try_into()?, vec![0].into())?;
        store.set(&"b/a".try_into()?, vec![0].into())?;
        store.set(&"bb/x".try_into()?, vec![0].into())?;
        assert_eq!(root.list_children()?, vec!["b", "bb"]);
        assert_eq!(b.list_children()?, vec!["a", "c"]);
        assert_eq!(
            b.child_paths()?,
            vec![NodePath::new("/b/a")?, NodePath::new("/b/c")?]
        );
        let empty = Group::new_with_metadata(store, "/empty", GroupMetadata::default())?;
        assert!(empty.list_children()?.is_empty());
        Ok(())
    }
}
