use crate::storage::StorePrefix;
use derive_more::Display;
use thiserror::Error;

/// A Zarr hierarchy node path.
///
/// A node path always starts with `/`. The root node path is `/`.
/// Paths are normalised on creation, so `""` is the root and `"a/b"` is `"/a/b"`.
///
/// See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#path>
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
pub struct NodePath(String);

/// An invalid node path.
#[derive(Debug, Error)]
#[error("invalid node path {0}")]
pub struct NodePathError(String);

impl NodePath {
    /// Create a new Zarr node path from `path`.
    ///
    /// A missing leading `/` is added.
    ///
    /// # Errors
    ///
    /// Returns [`NodePathError`] if `path` is not valid according to [`NodePath::validate`()] after normalisation.
    pub fn new(path: &str) -> Result<Self, NodePathError> {
        let normalised = if path.starts_with('/') {
            path.to_string()
        } else {
            "/".to_string() + path
        };
        if Self::validate(&normalised) {
            Ok(Self(normalised))
        } else {
            Err(NodePathError(path.to_string()))
        }
    }

    /// The root node.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Extracts a string slice containing the node path `String`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the root node path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Returns the name of the node: the last path segment, or an empty string for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Returns the path of the parent node, or [`None`] for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rsplit_once('/') {
            Some(("", _)) | None => Some(Self::root()),
            Some((parent, _)) => Some(Self(parent.to_string())),
        }
    }

    /// Returns the path of a child node named `name`.
    ///
    /// # Errors
    /// Returns [`NodePathError`] if `name` is not a valid node name.
    pub fn child(&self, name: &str) -> Result<Self, NodePathError> {
        if name.is_empty() || name.contains('/') {
            return Err(NodePathError(name.to_string()));
        }
        let path = if self.is_root() {
            format!("/{name}")
        } else {
            format!("{}/{name}", self.0)
        };
        Self::new(&path)
    }

    /// Validates a path according to the following rules of the Zarr V3 hierarchy:
    /// - A path always starts with `/`, and
    /// - a non-root path cannot end with `/`, because node names must be non-empty and cannot contain `/`.
    ///
    /// Additionally, it checks that there are no empty nodes (i.e. a `//` substring) and no `.` or `..` nodes.
    #[must_use]
    pub fn validate(path: &str) -> bool {
        path.eq("/")
            || path.strip_prefix('/').is_some_and(|path| {
                path.split('/')
                    .all(|name| !name.is_empty() && name != "." && name != "..")
            })
    }
}

impl TryFrom<&str> for NodePath {
    type Error = NodePathError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        Self::new(path)
    }
}

impl TryFrom<&StorePrefix> for NodePath {
    type Error = NodePathError;

    fn try_from(prefix: &StorePrefix) -> Result<Self, Self::Error> {
        let path = prefix.as_str();
        Self::new(path.strip_suffix('/').unwrap_or(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_path() {
        assert!(NodePath::new("/").is_ok());
        assert!(NodePath::new("/a/b").is_ok());
        assert_eq!(NodePath::new("/a/b").unwrap().to_string(), "/a/b");
        assert!(NodePath::new("/a/b/").is_err());
        assert_eq!(
            NodePath::new("/a/b/").unwrap_err().to_string(),
            "invalid node path /a/b/"
        );
        assert!(NodePath::new("/a//b").is_err());
        assert!(NodePath::new("/a/../b").is_err());
        assert!(NodePath::new("//").is_err());
    }

    #[test]
    fn node_path_normalised() {
        assert_eq!(NodePath::new("").unwrap(), NodePath::root());
        assert_eq!(NodePath::new("level1").unwrap().as_str(), "/level1");
        assert_eq!(
            NodePath::new("level1/data").unwrap(),
            NodePath::new("/level1/data").unwrap()
        );
    }

    #[test]
    fn node_path_relations() {
        let path = NodePath::new("/level1/data").unwrap();
        assert_eq!(path.name(), "data");
        assert_eq!(path.parent(), Some(NodePath::new("/level1").unwrap()));
        assert_eq!(
            path.parent().and_then(|p| p.parent()),
            Some(NodePath::root())
        );
        assert_eq!(NodePath::root().name(), "");
        assert_eq!(NodePath::root().parent(), None);
        assert_eq!(
            NodePath::root().child("level1").unwrap().as_str(),
            "/level1"
        );
        assert!(path.child("a/b").is_err());
        assert_eq!(
            NodePath::try_from(&StorePrefix::new("a/b/").unwrap()).unwrap(),
            NodePath::new("/a/b").unwrap()
        );
        assert_eq!(
            NodePath::try_from(&StorePrefix::root()).unwrap(),
            NodePath::root()
        );
    }
}
