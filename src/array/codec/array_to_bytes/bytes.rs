//! The `bytes` array to bytes codec.
//!
//! Encodes arrays of fixed-size numeric data types as little endian in lexicographical order.
//! Elements reach the codec chain already serialised little endian, so encoding and decoding only validate sizes.
//!
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/codecs/bytes/v1.0.html>.

mod bytes_codec;
mod bytes_configuration;

pub use bytes_codec::BytesCodec;
pub use bytes_configuration::{BytesCodecConfiguration, BytesCodecConfigurationV1};

use derive_more::Display;

use crate::{
    array::codec::{Codec, CodecPlugin},
    metadata::Metadata,
    plugin::{PluginCreateError, PluginMetadataInvalidError},
};

/// The identifier for the `bytes` codec.
pub const IDENTIFIER: &str = "bytes";

// Register the codec.
inventory::submit! {
    CodecPlugin::new(IDENTIFIER, is_name_bytes, create_codec_bytes)
}

fn is_name_bytes(name: &str) -> bool {
    name.eq(IDENTIFIER)
}

pub(crate) fn create_codec_bytes(metadata: &Metadata) -> Result<Codec, PluginCreateError> {
    let configuration: BytesCodecConfiguration = metadata
        .to_configuration()
        .map_err(|_| PluginMetadataInvalidError::new(IDENTIFIER, "codec", metadata.clone()))?;
    let codec = Box::new(BytesCodec::new_with_configuration(&configuration)?);
    Ok(Codec::ArrayToBytes(codec))
}

/// The endianness of each element in an array, either `big` or `little`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display)]
pub enum Endianness {
    /// Little endian.
    #[display("little")]
    Little,
    /// Big endian.
    #[display("big")]
    Big,
}

impl serde::Serialize for Endianness {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Little => s.serialize_str("little"),
            Self::Big => s.serialize_str("big"),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Endianness {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(d)?;
        if let serde_json::Value::String(string) = value {
            if string == "little" {
                return Ok(Self::Little);
            } else if string == "big" {
                return Ok(Self::Big);
            }
        }
        Err(serde::de::Error::custom(
            "endian: A string equal to either \"big\" or \"little\"",
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::array::{
        codec::{ArrayToBytesCodecTraits, CodecError, CodecTraits},
        BytesRepresentation, DataType,
    };

    use super::*;

    #[test]
    fn codec_bytes_configuration() {
        let configuration: BytesCodecConfiguration =
            serde_json::from_str(r#"{"endian":"little"}"#).unwrap();
        assert!(BytesCodec::new_with_configuration(&configuration).is_ok());
        let configuration: BytesCodecConfiguration = serde_json::from_str(r#"{}"#).unwrap();
        let codec = BytesCodec::new_with_configuration(&configuration).unwrap();
        assert_eq!(
            serde_json::to_string(&codec.create_metadata()).unwrap(),
            r#"{"name":"bytes","configuration":{}}"#
        );
        assert!(serde_json::from_str::<BytesCodecConfiguration>(r#"{"endian":"middle"}"#).is_err());
    }

    #[test]
    fn codec_bytes_big_endian_unsupported() {
        let metadata =
            Metadata::try_from(r#"{"name":"bytes","configuration":{"endian":"big"}}"#).unwrap();
        assert!(create_codec_bytes(&metadata).is_err());
    }

    #[test]
    fn codec_bytes_round_trip() {
        let elements: Vec<i32> = (0..16).collect();
        let bytes: Vec<u8> = elements.iter().flat_map(|e| e.to_le_bytes()).collect();
        let codec = BytesCodec::little();
        let encoded = codec.encode(bytes.clone(), &DataType::Int32).unwrap();
        assert_eq!(encoded, bytes);
        let decoded = codec
            .decode(encoded, &DataType::Int32, &BytesRepresentation::FixedSize(64))
            .unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn codec_bytes_invalid() {
        let codec = BytesCodec::little();
        assert!(matches!(
            codec.encode(vec![0; 3], &DataType::Int32),
            Err(CodecError::Other(_))
        ));
        assert!(matches!(
            codec.encode(vec![0; 3], &DataType::String),
            Err(CodecError::UnsupportedDataType(DataType::String, _))
        ));
        assert!(matches!(
            codec.decode(vec![0; 8], &DataType::Int32, &BytesRepresentation::FixedSize(4)),
            Err(CodecError::UnexpectedChunkDecodedSize(8, 4))
        ));
    }
}
