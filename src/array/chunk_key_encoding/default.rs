//! The default chunk key encoding.

use serde::{Deserialize, Serialize};

use crate::{
    array::chunk_key_encoding::ChunkKeyEncodingPlugin,
    metadata::{Metadata, MetadataConfiguration},
    plugin::{PluginCreateError, PluginMetadataInvalidError},
    storage::StoreKey,
};

use super::{ChunkKeyEncoding, ChunkKeyEncodingTraits, ChunkKeySeparator};

/// The identifier for the `default` chunk key encoding.
pub const IDENTIFIER: &str = "default";

// Register the chunk key encoding.
inventory::submit! {
    ChunkKeyEncodingPlugin::new(IDENTIFIER, is_name_default, create_chunk_key_encoding_default)
}

fn is_name_default(name: &str) -> bool {
    name.eq(IDENTIFIER)
}

pub(crate) fn create_chunk_key_encoding_default(
    metadata: &Metadata,
) -> Result<ChunkKeyEncoding, PluginCreateError> {
    let configuration: DefaultChunkKeyEncodingConfiguration =
        metadata.to_configuration().map_err(|_| {
            PluginMetadataInvalidError::new(IDENTIFIER, "chunk key encoding", metadata.clone())
        })?;
    let default = DefaultChunkKeyEncoding::new(configuration.separator);
    Ok(ChunkKeyEncoding::new(default))
}

/// Configuration parameters for a `default` chunk key encoding.
#[derive(Serialize, Deserialize, Clone, Eq, PartialEq, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct DefaultChunkKeyEncodingConfiguration {
    /// The chunk key separator. Defaults to `/`.
    #[serde(default)]
    pub separator: ChunkKeySeparator,
}

/// A `default` chunk key encoding.
///
/// The key for a chunk with grid index (k, j, i, ...) is formed by taking the initial prefix c, and appending for each dimension:
/// - the separator character, followed by,
/// - the ASCII decimal string representation of the chunk index within that dimension.
///
/// The key of the single chunk of a zero dimensional array is `c`.
///
/// See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#chunk-key-encoding>.
#[derive(Debug, Clone, Default)]
pub struct DefaultChunkKeyEncoding {
    separator: ChunkKeySeparator,
}

impl DefaultChunkKeyEncoding {
    /// Create a new `default` chunk key encoding with separator `separator`.
    #[must_use]
    pub const fn new(separator: ChunkKeySeparator) -> Self {
        Self { separator }
    }

    /// Create a new `default` chunk key encoding with separator `.`.
    #[must_use]
    pub const fn new_dot() -> Self {
        Self::new(ChunkKeySeparator::Dot)
    }

    /// Create a new `default` chunk key encoding with separator `/`.
    #[must_use]
    pub const fn new_slash() -> Self {
        Self::new(ChunkKeySeparator::Slash)
    }

    /// Returns the separator.
    #[must_use]
    pub const fn separator(&self) -> ChunkKeySeparator {
        self.separator
    }
}

impl From<DefaultChunkKeyEncoding> for ChunkKeyEncoding {
    fn from(chunk_key_encoding: DefaultChunkKeyEncoding) -> Self {
        Self::new(chunk_key_encoding)
    }
}

impl ChunkKeyEncodingTraits for DefaultChunkKeyEncoding {
    fn create_metadata(&self) -> Metadata {
        let mut configuration = MetadataConfiguration::new();
        configuration.insert(
            "separator".to_string(),
            self.separator.to_string().into(),
        );
        Metadata::new_with_configuration(IDENTIFIER, configuration)
    }

    fn encode(&self, chunk_grid_indices: &[u64]) -> StoreKey {
        let separator = self.separator.to_string();
        let mut key = "c".to_string();
        for index in chunk_grid_indices {
            key.push_str(&separator);
            key.push_str(&index.to_string());
        }
        StoreKey::new_unchecked(key)
    }
}

#[cfg(test)]
mod tests {
    use crate::{node::NodePath, storage::data_key};

    use super::*;

    #[test]
    fn slash_nd() {
        let key = data_key(
            &NodePath::root(),
            &[1, 23, 45],
            &DefaultChunkKeyEncoding::new_slash().into(),
        );
        assert_eq!(key, StoreKey::new("c/1/23/45").unwrap());
    }

    #[test]
    fn dot_nd() {
        let key = data_key(
            &NodePath::root(),
            &[1, 23, 45],
            &DefaultChunkKeyEncoding::new_dot().into(),
        );
        assert_eq!(key, StoreKey::new("c.1.23.45").unwrap());
    }

    #[test]
    fn slash_scalar() {
        let key = data_key(
            &NodePath::root(),
            &[],
            &DefaultChunkKeyEncoding::new_slash().into(),
        );
        assert_eq!(key, StoreKey::new("c").unwrap());
    }

    #[test]
    fn deterministic() {
        let encoding = DefaultChunkKeyEncoding::default();
        assert_eq!(encoding.encode(&[1, 2]), encoding.encode(&[1, 2]));
        assert_eq!(encoding.encode(&[1, 2]).as_str(), "c/1/2");
    }

    #[test]
    fn default_configuration() {
        let metadata = Metadata::try_from(r#"{"name":"default"}"#).unwrap();
        let encoding = create_chunk_key_encoding_default(&metadata).unwrap();
        assert_eq!(encoding.encode(&[0]).as_str(), "c/0");
        let metadata =
            Metadata::try_from(r#"{"name":"default","configuration":{"separator":"-"}}"#).unwrap();
        assert!(create_chunk_key_encoding_default(&metadata).is_err());
    }
}
