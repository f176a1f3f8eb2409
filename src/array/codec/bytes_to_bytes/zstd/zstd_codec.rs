use std::io::Write;

use crate::{
    array::{
        codec::{validate_decoded_size, BytesToBytesCodecTraits, CodecError, CodecTraits},
        BytesRepresentation,
    },
    metadata::Metadata,
};

use super::{
    ZstdCodecConfiguration, ZstdCodecConfigurationV1, ZstdCompressionLevel, IDENTIFIER,
};

/// A `zstd` codec implementation.
#[derive(Clone, Debug)]
pub struct ZstdCodec {
    compression: ZstdCompressionLevel,
    checksum: bool,
}

impl ZstdCodec {
    /// Create a new `zstd` codec.
    ///
    /// `compression` is clamped to the valid range of compression levels.
    #[must_use]
    pub fn new(compression: i32, checksum: bool) -> Self {
        Self {
            compression: ZstdCompressionLevel::new(compression),
            checksum,
        }
    }

    /// Create a new `zstd` codec from configuration.
    #[must_use]
    pub const fn new_with_configuration(configuration: &ZstdCodecConfiguration) -> Self {
        let ZstdCodecConfiguration::V1(configuration) = configuration;
        Self {
            compression: configuration.level,
            checksum: configuration.checksum,
        }
    }
}

impl CodecTraits for ZstdCodec {
    fn create_metadata(&self) -> Metadata {
        let configuration = ZstdCodecConfigurationV1 {
            level: self.compression,
            checksum: self.checksum,
        };
        Metadata::new_with_serializable_configuration(IDENTIFIER, &configuration)
            .unwrap_or_else(|_| Metadata::new(IDENTIFIER))
    }
}

impl BytesToBytesCodecTraits for ZstdCodec {
    fn encode(&self, decoded_value: Vec<u8>) -> Result<Vec<u8>, CodecError> {
        let mut encoder = zstd::stream::Encoder::new(
            Vec::with_capacity(decoded_value.len() / 2),
            self.compression.as_i32(),
        )?;
        encoder.include_checksum(self.checksum)?;
        encoder.write_all(&decoded_value)?;
        Ok(encoder.finish()?)
    }

    fn decode(
        &self,
        encoded_value: Vec<u8>,
        decoded_representation: &BytesRepresentation,
    ) -> Result<Vec<u8>, CodecError> {
        let decoded_value = match decoded_representation {
            BytesRepresentation::FixedSize(size) => {
                let capacity = usize::try_from(*size)
                    .map_err(|_| CodecError::UnexpectedChunkDecodedSize(0, *size))?;
                zstd::bulk::decompress(&encoded_value, capacity)?
            }
            BytesRepresentation::BoundedSize(_) | BytesRepresentation::UnboundedSize => {
                zstd::decode_all(encoded_value.as_slice())?
            }
        };
        validate_decoded_size(&decoded_value, decoded_representation)?;
        Ok(decoded_value)
    }

    fn compute_encoded_size(
        &self,
        decoded_representation: &BytesRepresentation,
    ) -> BytesRepresentation {
        match decoded_representation.size() {
            Some(size) => {
                // https://github.com/facebook/zstd/blob/dev/doc/zstd_compression_format.md
                const HEADER_TRAILER_OVERHEAD: u64 = 4 + 14 + 4;
                const MIN_WINDOW_SIZE: u64 = 1000; // 1KB
                const BLOCK_OVERHEAD: u64 = 3;
                let blocks_overhead = BLOCK_OVERHEAD * size.div_ceil(MIN_WINDOW_SIZE);
                BytesRepresentation::BoundedSize(size + HEADER_TRAILER_OVERHEAD + blocks_overhead)
            }
            None => BytesRepresentation::UnboundedSize,
        }
    }
}
