use crate::{
    array::{
        codec::{validate_decoded_size, BytesToBytesCodecTraits, CodecError, CodecTraits},
        BytesRepresentation,
    },
    config::global_config,
    metadata::Metadata,
};

use super::{Crc32cCodecConfiguration, Crc32cCodecConfigurationV1, CHECKSUM_SIZE, IDENTIFIER};

/// A `CRC32C checksum` codec implementation.
#[derive(Clone, Debug, Default)]
pub struct Crc32cCodec;

impl Crc32cCodec {
    /// Create a new `CRC32C checksum` codec.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Create a new `CRC32C checksum` codec from configuration.
    #[must_use]
    pub const fn new_with_configuration(_configuration: &Crc32cCodecConfiguration) -> Self {
        Self {}
    }
}

impl CodecTraits for Crc32cCodec {
    fn create_metadata(&self) -> Metadata {
        let configuration = Crc32cCodecConfigurationV1 {};
        Metadata::new_with_serializable_configuration(IDENTIFIER, &configuration)
            .unwrap_or_else(|_| Metadata::new(IDENTIFIER))
    }
}

impl BytesToBytesCodecTraits for Crc32cCodec {
    fn encode(&self, mut decoded_value: Vec<u8>) -> Result<Vec<u8>, CodecError> {
        let checksum = crc32c::crc32c(&decoded_value).to_le_bytes();
        decoded_value.reserve_exact(checksum.len());
        decoded_value.extend(&checksum);
        Ok(decoded_value)
    }

    fn decode(
        &self,
        mut encoded_value: Vec<u8>,
        decoded_representation: &BytesRepresentation,
    ) -> Result<Vec<u8>, CodecError> {
        if encoded_value.len() < CHECKSUM_SIZE {
            return Err(CodecError::Other(format!(
                "CRC32C checksum decoder expects at least {CHECKSUM_SIZE} bytes, got {}",
                encoded_value.len()
            )));
        }
        let payload_len = encoded_value.len() - CHECKSUM_SIZE;
        if global_config().validate_checksums() {
            let (payload, stored_checksum) = encoded_value.split_at(payload_len);
            let checksum = crc32c::crc32c(payload).to_le_bytes();
            if checksum != stored_checksum {
                return Err(CodecError::InvalidChecksum);
            }
        }
        encoded_value.truncate(payload_len);
        validate_decoded_size(&encoded_value, decoded_representation)?;
        Ok(encoded_value)
    }

    fn compute_encoded_size(
        &self,
        decoded_representation: &BytesRepresentation,
    ) -> BytesRepresentation {
        match decoded_representation {
            BytesRepresentation::FixedSize(size) => {
                BytesRepresentation::FixedSize(size + CHECKSUM_SIZE as u64)
            }
            BytesRepresentation::BoundedSize(size) => {
                BytesRepresentation::BoundedSize(size + CHECKSUM_SIZE as u64)
            }
            BytesRepresentation::UnboundedSize => BytesRepresentation::UnboundedSize,
        }
    }
}
