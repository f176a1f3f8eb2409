//! Zarr chunk key encodings. Includes a [default](default::DefaultChunkKeyEncoding) implementation.
//!
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#chunk-key-encoding>.
//!
//! A [`ChunkKeyEncoding`] maps chunk grid indices to a store key relative to the array path.
//! Chunk key encodings are registered through [`inventory`] as a [`ChunkKeyEncodingPlugin`].

mod default;

pub use default::{DefaultChunkKeyEncoding, DefaultChunkKeyEncodingConfiguration};

use crate::{
    metadata::Metadata,
    plugin::{create_from_registry, Plugin, PluginCreateError},
    storage::StoreKey,
};

use derive_more::{Deref, Display, From};

/// A chunk key encoding.
#[derive(Debug, Clone, From, Deref)]
pub struct ChunkKeyEncoding(Box<dyn ChunkKeyEncodingTraits>);

/// A chunk key encoding plugin.
pub type ChunkKeyEncodingPlugin = Plugin<ChunkKeyEncoding>;
inventory::collect!(ChunkKeyEncodingPlugin);

impl ChunkKeyEncoding {
    /// Create a chunk key encoding.
    pub fn new<T: ChunkKeyEncodingTraits + 'static>(chunk_key_encoding: T) -> Self {
        let chunk_key_encoding: Box<dyn ChunkKeyEncodingTraits> = Box::new(chunk_key_encoding);
        chunk_key_encoding.into()
    }

    /// Create a chunk key encoding from metadata.
    ///
    /// # Errors
    ///
    /// Returns [`PluginCreateError`] if the metadata is invalid or not associated with a registered chunk key encoding plugin.
    pub fn from_metadata(metadata: &Metadata) -> Result<Self, PluginCreateError> {
        create_from_registry(
            inventory::iter::<ChunkKeyEncodingPlugin>,
            metadata,
            "chunk key encoding",
        )
    }
}

/// Chunk key encoding traits.
pub trait ChunkKeyEncodingTraits: dyn_clone::DynClone + core::fmt::Debug + Send + Sync {
    /// Create the metadata of this chunk key encoding.
    fn create_metadata(&self) -> Metadata;

    /// Encode chunk grid indices (grid cell coordinates) into a store key.
    fn encode(&self, chunk_grid_indices: &[u64]) -> StoreKey;
}

dyn_clone::clone_trait_object!(ChunkKeyEncodingTraits);

/// A chunk key separator.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display, Default)]
pub enum ChunkKeySeparator {
    /// The slash '/' character.
    #[default]
    #[display("/")]
    Slash,
    /// The dot '.' character.
    #[display(".")]
    Dot,
}

impl TryFrom<char> for ChunkKeySeparator {
    type Error = char;

    fn try_from(separator: char) -> Result<Self, Self::Error> {
        if separator == '/' {
            Ok(Self::Slash)
        } else if separator == '.' {
            Ok(Self::Dot)
        } else {
            Err(separator)
        }
    }
}

impl serde::Serialize for ChunkKeySeparator {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            ChunkKeySeparator::Slash => s.serialize_char('/'),
            ChunkKeySeparator::Dot => s.serialize_char('.'),
        }
    }
}

impl<'de> serde::Deserialize<'de> for ChunkKeySeparator {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(d)?;
        if let serde_json::Value::String(separator) = value {
            if separator == "/" {
                return Ok(ChunkKeySeparator::Slash);
            } else if separator == "." {
                return Ok(ChunkKeySeparator::Dot);
            }
        }
        Err(serde::de::Error::custom(
            "chunk key separator must be a `.` or `/`.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_key_encoding_from_metadata() {
        let metadata =
            Metadata::try_from(r#"{"name":"default","configuration":{"separator":"."}}"#).unwrap();
        let encoding = ChunkKeyEncoding::from_metadata(&metadata).unwrap();
        assert_eq!(encoding.encode(&[1, 2]).as_str(), "c.1.2");
        assert_eq!(encoding.create_metadata(), metadata);
    }

    #[test]
    fn chunk_key_encoding_unsupported() {
        let metadata = Metadata::new("v2");
        assert_eq!(
            ChunkKeyEncoding::from_metadata(&metadata)
                .unwrap_err()
                .to_string(),
            "chunk key encoding v2 is not supported"
        );
    }

    #[test]
    fn chunk_key_separator() {
        assert_eq!(ChunkKeySeparator::try_from('/'), Ok(ChunkKeySeparator::Slash));
        assert_eq!(ChunkKeySeparator::try_from('.'), Ok(ChunkKeySeparator::Dot));
        assert_eq!(ChunkKeySeparator::try_from('-'), Err('-'));
        assert_eq!(ChunkKeySeparator::Dot.to_string(), ".");
        assert!(serde_json::from_str::<ChunkKeySeparator>(r#""-""#).is_err());
    }
}
