use crate::{
    array::{
        codec::{
            validate_decoded_size, ArrayToBytesCodecTraits, CodecError, CodecTraits,
        },
        BytesRepresentation, DataType, DataTypeSize,
    },
    metadata::Metadata,
    plugin::PluginCreateError,
};

use super::{BytesCodecConfiguration, BytesCodecConfigurationV1, Endianness, IDENTIFIER};

/// A `bytes` codec implementation.
///
/// Only little endian is supported.
#[derive(Debug, Clone)]
pub struct BytesCodec {
    endian: Option<Endianness>,
}

impl Default for BytesCodec {
    fn default() -> Self {
        Self::little()
    }
}

impl BytesCodec {
    /// Create a new `bytes` codec for little endian data.
    #[must_use]
    pub const fn little() -> Self {
        Self {
            endian: Some(Endianness::Little),
        }
    }

    /// Create a new `bytes` codec from configuration.
    ///
    /// # Errors
    /// Returns [`PluginCreateError`] if the configuration requests big endian encoding.
    pub fn new_with_configuration(
        configuration: &BytesCodecConfiguration,
    ) -> Result<Self, PluginCreateError> {
        let BytesCodecConfiguration::V1(configuration) = configuration;
        match configuration.endian {
            Some(Endianness::Big) => Err(PluginCreateError::Other(
                "the bytes codec does not support big endian encoding".to_string(),
            )),
            endian => Ok(Self { endian }),
        }
    }

    /// Returns the configured endianness.
    #[must_use]
    pub const fn endian(&self) -> Option<Endianness> {
        self.endian
    }

    fn element_size(data_type: &DataType) -> Result<usize, CodecError> {
        match data_type.size() {
            DataTypeSize::Fixed(size) => Ok(size),
            DataTypeSize::Variable => Err(CodecError::UnsupportedDataType(
                *data_type,
                IDENTIFIER.to_string(),
            )),
        }
    }
}

impl CodecTraits for BytesCodec {
    fn create_metadata(&self) -> Metadata {
        let configuration = BytesCodecConfigurationV1 {
            endian: self.endian,
        };
        Metadata::new_with_serializable_configuration(IDENTIFIER, &configuration)
            .unwrap_or_else(|_| Metadata::new(IDENTIFIER))
    }
}

impl ArrayToBytesCodecTraits for BytesCodec {
    fn encode(&self, decoded_value: Vec<u8>, data_type: &DataType) -> Result<Vec<u8>, CodecError> {
        let element_size = Self::element_size(data_type)?;
        if element_size == 0 || decoded_value.len() % element_size != 0 {
            return Err(CodecError::Other(format!(
                "the bytes codec cannot encode {} bytes as {data_type} elements",
                decoded_value.len()
            )));
        }
        Ok(decoded_value)
    }

    fn decode(
        &self,
        encoded_value: Vec<u8>,
        data_type: &DataType,
        decoded_representation: &BytesRepresentation,
    ) -> Result<Vec<u8>, CodecError> {
        Self::element_size(data_type)?;
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
