use crate::{
    array::{
        codec::{validate_decoded_size, BytesToBytesCodecTraits, CodecError, CodecTraits},
        BytesRepresentation,
    },
    metadata::{Metadata, MetadataConfiguration},
};

use super::IDENTIFIER;

/// An `identity` codec implementation.
#[derive(Clone, Debug, Default)]
pub struct IdentityCodec;

impl IdentityCodec {
    /// Create a new `identity` codec.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CodecTraits for IdentityCodec {
    fn create_metadata(&self) -> Metadata {
        Metadata::new_with_configuration(IDENTIFIER, MetadataConfiguration::new())
    }
}

impl BytesToBytesCodecTraits for IdentityCodec {
    fn encode(&self, decoded_value: Vec<u8>) -> Result<Vec<u8>, CodecError> {
        Ok(decoded_value)
    }

    fn decode(
        &self,
        encoded_value: Vec<u8>,
        decoded_representation: &BytesRepresentation,
    ) -> Result<Vec<u8>, CodecError> {
        validate_decoded_size(&encoded_value, decoded_representation)?;
        Ok(encoded_value)
    }

    fn compute_encoded_size(
        &self,
        decoded_representation: &BytesRepresentation,
    ) -> BytesRepresentation {
        *decoded_representation
    }
}
