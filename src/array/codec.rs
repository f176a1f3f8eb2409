//! Zarr codecs.
//!
//! Array chunks are encoded by a [`CodecChain`] before being written to a store, and decoded by the same chain when read.
//!
//! A codec is either:
//!  - an [`ArrayToBytesCodecTraits`] codec, which maps the little-endian element bytes of a chunk to a byte string, or
//!  - a [`BytesToBytesCodecTraits`] codec, which maps a byte string to another byte string (e.g. compression or checksumming).
//!
//! Codecs are zarr extension points and they are registered through [`inventory`] as a [`CodecPlugin`].
//! A codec is created from its [`Metadata`] with [`Codec::from_metadata`].
//!
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#id18>.

pub mod array_to_bytes;
pub mod bytes_to_bytes;

pub use array_to_bytes::{
    bytes::{BytesCodec, BytesCodecConfiguration, BytesCodecConfigurationV1, Endianness},
    codec_chain::CodecChain,
};

#[cfg(feature = "crc32c")]
pub use bytes_to_bytes::crc32c::{
    Crc32cCodec, Crc32cCodecConfiguration, Crc32cCodecConfigurationV1,
};
#[cfg(feature = "gzip")]
pub use bytes_to_bytes::gzip::{
    GzipCodec, GzipCodecConfiguration, GzipCodecConfigurationV1, GzipCompressionLevel,
    GzipCompressionLevelError,
};
pub use bytes_to_bytes::identity::{
    IdentityCodec, IdentityCodecConfiguration, IdentityCodecConfigurationV1,
};
#[cfg(feature = "zstd")]
pub use bytes_to_bytes::zstd::{
    ZstdCodec, ZstdCodecConfiguration, ZstdCodecConfigurationV1, ZstdCompressionLevel,
};

use thiserror::Error;

use crate::{
    metadata::Metadata,
    plugin::{create_from_registry, Plugin, PluginCreateError},
};

use super::{BytesRepresentation, DataType};

/// A codec plugin.
pub type CodecPlugin = Plugin<Codec>;
inventory::collect!(CodecPlugin);

/// A generic array to bytes or bytes to bytes codec.
#[derive(Debug, Clone)]
pub enum Codec {
    /// An array to bytes codec.
    ArrayToBytes(Box<dyn ArrayToBytesCodecTraits>),
    /// A bytes to bytes codec.
    BytesToBytes(Box<dyn BytesToBytesCodecTraits>),
}

impl Codec {
    /// Create a codec from metadata.
    ///
    /// # Errors
    ///
    /// Returns [`PluginCreateError`] if the metadata is invalid or not associated with a registered codec plugin.
    pub fn from_metadata(metadata: &Metadata) -> Result<Self, PluginCreateError> {
        create_from_registry(inventory::iter::<CodecPlugin>, metadata, "codec")
    }

    /// Create the metadata of the codec.
    #[must_use]
    pub fn create_metadata(&self) -> Metadata {
        match self {
            Self::ArrayToBytes(codec) => codec.create_metadata(),
            Self::BytesToBytes(codec) => codec.create_metadata(),
        }
    }
}

/// Codec traits.
pub trait CodecTraits: Send + Sync {
    /// Create metadata.
    fn create_metadata(&self) -> Metadata;
}

/// Traits for array to bytes codecs.
///
/// The decoded representation of an array to bytes codec is the concatenated little-endian bytes of the chunk elements.
pub trait ArrayToBytesCodecTraits: CodecTraits + dyn_clone::DynClone + core::fmt::Debug {
    /// Encode the element bytes of a chunk with data type `data_type`.
    ///
    /// # Errors
    /// Returns [`CodecError`] if a codec fails or `data_type` is not supported by the codec.
    fn encode(&self, decoded_value: Vec<u8>, data_type: &DataType) -> Result<Vec<u8>, CodecError>;

    /// Decode a chunk with data type `data_type` to its element bytes.
    ///
    /// # Errors
    /// Returns [`CodecError`] if a codec fails, `data_type` is not supported, or the decoded size does not match `decoded_representation`.
    fn decode(
        &self,
        encoded_value: Vec<u8>,
        data_type: &DataType,
        decoded_representation: &BytesRepresentation,
    ) -> Result<Vec<u8>, CodecError>;

    /// Returns the size of the encoded representation given a size of the decoded representation.
    fn compute_encoded_size(
        &self,
        decoded_representation: &BytesRepresentation,
    ) -> BytesRepresentation;
}

dyn_clone::clone_trait_object!(ArrayToBytesCodecTraits);

/// Traits for bytes to bytes codecs.
pub trait BytesToBytesCodecTraits: CodecTraits + dyn_clone::DynClone + core::fmt::Debug {
    /// Encode bytes.
    ///
    /// # Errors
    /// Returns [`CodecError`] if a codec fails.
    fn encode(&self, decoded_value: Vec<u8>) -> Result<Vec<u8>, CodecError>;

    /// Decode bytes.
    ///
    /// `decoded_representation` is the expected size of the output.
    /// A codec must fail rather than return a value of a different [fixed size](BytesRepresentation::FixedSize).
    ///
    /// # Errors
    /// Returns [`CodecError`] if a codec fails.
    fn decode(
        &self,
        encoded_value: Vec<u8>,
        decoded_representation: &BytesRepresentation,
    ) -> Result<Vec<u8>, CodecError>;

    /// Returns the size of the encoded representation given a size of the decoded representation.
    fn compute_encoded_size(
        &self,
        decoded_representation: &BytesRepresentation,
    ) -> BytesRepresentation;
}

dyn_clone::clone_trait_object!(BytesToBytesCodecTraits);

/// Check that `value` matches a fixed size `decoded_representation`.
///
/// Bounded sizes are estimates and are not enforced.
///
/// # Errors
/// Returns [`CodecError::UnexpectedChunkDecodedSize`] on a size mismatch.
pub(crate) fn validate_decoded_size(
    value: &[u8],
    decoded_representation: &BytesRepresentation,
) -> Result<(), CodecError> {
    match decoded_representation {
        BytesRepresentation::FixedSize(size) if value.len() as u64 != *size => Err(
            CodecError::UnexpectedChunkDecodedSize(value.len(), *size),
        ),
        _ => Ok(()),
    }
}

/// A codec error.
#[derive(Debug, Error)]
pub enum CodecError {
    /// An IO error, including errors reported by compression libraries.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    /// The decoded size of a chunk did not match what was expected.
    #[error("the size of a decoded chunk is {_0}, expected {_1}")]
    UnexpectedChunkDecodedSize(usize, u64),
    /// An embedded checksum does not match the decoded value.
    #[error("the checksum is invalid")]
    InvalidChecksum,
    /// The encoded value does not have the framing expected by the codec.
    #[error("invalid framing: {_0}")]
    InvalidFraming(String),
    /// Unsupported data type
    #[error("unsupported data type {0} for codec {1}")]
    UnsupportedDataType(DataType, String),
    /// Other
    #[error("{_0}")]
    Other(String),
}

impl From<&str> for CodecError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<String> for CodecError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_unsupported() {
        let metadata = Metadata::new("blosc");
        assert_eq!(
            Codec::from_metadata(&metadata).unwrap_err().to_string(),
            "codec blosc is not supported"
        );
    }

    #[test]
    fn codec_metadata_round_trip() {
        let mut jsons = vec![
            r#"{"name":"bytes","configuration":{"endian":"little"}}"#,
            r#"{"name":"identity","configuration":{}}"#,
        ];
        #[cfg(feature = "crc32c")]
        jsons.push(r#"{"name":"crc32c","configuration":{}}"#);
        #[cfg(feature = "gzip")]
        jsons.push(r#"{"name":"gzip","configuration":{"level":1}}"#);
        #[cfg(feature = "zstd")]
        jsons.push(r#"{"name":"zstd","configuration":{"level":3,"checksum":false}}"#);
        for json in jsons {
            let metadata = Metadata::try_from(json).unwrap();
            let codec = Codec::from_metadata(&metadata).unwrap();
            assert_eq!(serde_json::to_string(&codec.create_metadata()).unwrap(), json);
        }
    }

    #[test]
    fn validate_decoded_size_fixed() {
        assert!(validate_decoded_size(&[0; 4], &BytesRepresentation::FixedSize(4)).is_ok());
        assert!(matches!(
            validate_decoded_size(&[0; 3], &BytesRepresentation::FixedSize(4)),
            Err(CodecError::UnexpectedChunkDecodedSize(3, 4))
        ));
        assert!(validate_decoded_size(&[0; 3], &BytesRepresentation::BoundedSize(4)).is_ok());
        assert!(validate_decoded_size(&[0; 3], &BytesRepresentation::UnboundedSize).is_ok());
    }
}
