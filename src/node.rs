//! Zarr nodes.
//!
//! A node in a Zarr hierarchy represents either an [`Array`] or a [`Group`].
//! [`Node::open`] reads the metadata at a path and returns whichever kind of node is stored there.
//!
//! The [`Node::hierarchy_tree`] function can be used to create a string representation of the hierarchy below a node.

mod node_path;

use std::sync::Arc;

use thiserror::Error;

pub use node_path::{NodePath, NodePathError};

use crate::{
    array::{Array, ArrayCreateError},
    group::{Group, GroupCreateError},
    metadata::NodeMetadata,
    storage::{meta_key, ListableStorageTraits, ReadableStorageTraits, StorageError},
};

/// A Zarr hierarchy node.
///
/// See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#hierarchy>.
#[derive(Debug, Clone)]
pub enum Node<TStorage: ?Sized> {
    /// A group.
    Group(Group<TStorage>),
    /// An array.
    Array(Array<TStorage>),
}

/// A node creation error.
#[derive(Debug, Error)]
pub enum NodeCreateError {
    /// An invalid node path
    #[error(transparent)]
    NodePathError(#[from] NodePathError),
    /// There is no metadata at the node path.
    #[error("node metadata is missing at {0}")]
    MissingMetadata(NodePath),
    /// A storage error.
    #[error(transparent)]
    StorageError(#[from] StorageError),
    /// An error deserializing the metadata.
    #[error(transparent)]
    MetadataDeserializationError(#[from] serde_json::Error),
    /// The array metadata is invalid.
    #[error(transparent)]
    Array(#[from] ArrayCreateError),
    /// The group metadata is invalid.
    #[error(transparent)]
    Group(#[from] GroupCreateError),
}

impl<TStorage: ?Sized> From<Group<TStorage>> for Node<TStorage> {
    fn from(group: Group<TStorage>) -> Self {
        Self::Group(group)
    }
}

impl<TStorage: ?Sized> From<Array<TStorage>> for Node<TStorage> {
    fn from(array: Array<TStorage>) -> Self {
        Self::Array(array)
    }
}

impl<TStorage: ?Sized + ReadableStorageTraits> Node<TStorage> {
    /// Open the node in `storage` at `path`, detecting whether it is a group or an array from its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`NodeCreateError`] if there is no metadata at `path`, the metadata is invalid, or there is a storage error.
    pub fn open(storage: Arc<TStorage>, path: &str) -> Result<Self, NodeCreateError> {
        let node_path = NodePath::new(path)?;
        let metadata = storage
            .get(&meta_key(&node_path))?
            .ok_or_else(|| NodeCreateError::MissingMetadata(node_path.clone()))?;
        let metadata: NodeMetadata = serde_json::from_slice(&metadata)?;
        Ok(match metadata {
            NodeMetadata::Array(metadata) => {
                Array::new_with_metadata(storage, path, metadata)?.into()
            }
            NodeMetadata::Group(metadata) => {
                Group::new_with_metadata(storage, path, metadata)?.into()
            }
        })
    }
}

impl<TStorage: ?Sized> Node<TStorage> {
    /// Returns the path of the node.
    #[must_use]
    pub const fn path(&self) -> &NodePath {
        match self {
            Self::Group(group) => group.path(),
            Self::Array(array) => array.path(),
        }
    }

    /// Returns the name of the node: the last segment of its path, or an empty string for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path().name()
    }

    /// Indicates if a node is the root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path().is_root()
    }

    /// Returns true if the node is a group.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Returns true if the node is an array.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Returns the group, if the node is a group.
    #[must_use]
    pub const fn as_group(&self) -> Option<&Group<TStorage>> {
        match self {
            Self::Group(group) => Some(group),
            Self::Array(_) => None,
        }
    }

    /// Returns the array, if the node is an array.
    #[must_use]
    pub const fn as_array(&self) -> Option<&Array<TStorage>> {
        match self {
            Self::Array(array) => Some(array),
            Self::Group(_) => None,
        }
    }
}

impl<TStorage: ?Sized + ReadableStorageTraits + ListableStorageTraits> Node<TStorage> {
    /// Return a tree representation of the hierarchy below the node as a string.
    ///
    /// Arrays are annotated with their shape and data type.
    /// Children without metadata are listed by name only.
    /// For example:
    /// ```text
    /// /
    ///   a
    ///     baz [10000, 1000] float64
    ///     foo [10000, 1000] float64
    ///   b
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`NodeCreateError`] if a child cannot be listed or has invalid metadata.
    pub fn hierarchy_tree(&self) -> Result<String, NodeCreateError> {
        fn update_tree<TStorage: ?Sized + ReadableStorageTraits + ListableStorageTraits>(
            string: &mut String,
            node: &Node<TStorage>,
            name: &str,
            depth: usize,
        ) -> Result<(), NodeCreateError> {
            string.push_str(&" ".repeat(depth * 2));
            match node {
                Node::Array(array) => {
                    string.push_str(&format!(
                        "{name} {:?} {}\n",
                        array.shape(),
                        array.data_type()
                    ));
                }
                Node::Group(group) => {
                    string.push_str(name);
                    string.push('\n');
                    for child_path in group.child_paths()? {
                        match Node::open(group.storage(), child_path.as_str()) {
                            Ok(child) => update_tree(string, &child, child_path.name(), depth + 1)?,
                            Err(NodeCreateError::MissingMetadata(_)) => {
                                string.push_str(&" ".repeat((depth + 1) * 2));
                                string.push_str(child_path.name());
                                string.push('\n');
                            }
                            Err(err) => return Err(err),
                        }
                    }
                }
            }
            Ok(())
        }

        let mut string = String::default();
        let name = if self.is_root() { "/" } else { self.name() };
        update_tree(&mut string, self, name, 0)?;
        Ok(string)
    }
}
