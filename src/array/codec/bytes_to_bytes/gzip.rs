//! The `gzip` bytes to bytes codec.
//!
//! Applies gzip compression in the RFC 1952 member format.
//! Encoded values in any other framing, such as a bare RFC 1950 zlib stream, are rejected with [`CodecError::InvalidFraming`](crate::array::codec::CodecError::InvalidFraming).
//!
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/codecs/gzip/v1.0.html>.

mod gzip_codec;
mod gzip_compression_level;
mod gzip_configuration;

pub use gzip_codec::GzipCodec;
pub use gzip_compression_level::{GzipCompressionLevel, GzipCompressionLevelError};
pub use gzip_configuration::{GzipCodecConfiguration, GzipCodecConfigurationV1};

use crate::{
    array::codec::{Codec, CodecPlugin},
    metadata::Metadata,
    plugin::{PluginCreateError, PluginMetadataInvalidError},
};

/// The identifier for the `gzip` codec.
pub const IDENTIFIER: &str = "gzip";

// Register the codec.
inventory::submit! {
    CodecPlugin::new(IDENTIFIER, is_name_gzip, create_codec_gzip)
}

fn is_name_gzip(name: &str) -> bool {
    name.eq(IDENTIFIER)
}

pub(crate) fn create_codec_gzip(metadata: &Metadata) -> Result<Codec, PluginCreateError> {
    let configuration: GzipCodecConfiguration = metadata
        .to_configuration()
        .map_err(|_| PluginMetadataInvalidError::new(IDENTIFIER, "codec", metadata.clone()))?;
    let codec = Box::new(GzipCodec::new_with_configuration(&configuration));
    Ok(Codec::BytesToBytes(codec))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::array::{
        codec::{bytes_to_bytes::test_util, BytesToBytesCodecTraits, CodecError, CodecTraits},
        BytesRepresentation,
    };

    use super::*;

    const JSON_VALID: &str = r#"{
        "level": 1
    }"#;

    #[test]
    fn codec_gzip_configuration_valid() {
        let configuration: GzipCodecConfiguration = serde_json::from_str(JSON_VALID).unwrap();
        let codec = GzipCodec::new_with_configuration(&configuration);
        assert_eq!(
            serde_json::to_string(&codec.create_metadata()).unwrap(),
            r#"{"name":"gzip","configuration":{"level":1}}"#
        );
    }

    #[test]
    fn codec_gzip_configuration_invalid() {
        assert!(serde_json::from_str::<GzipCodecConfiguration>(r#"{"level": -1}"#).is_err());
        assert!(serde_json::from_str::<GzipCodecConfiguration>(r#"{"level": 10}"#).is_err());
        assert!(serde_json::from_str::<GzipCodecConfiguration>(r#"{"level": 1.5}"#).is_err());
        assert!(create_codec_gzip(&Metadata::try_from(r#"{"name":"gzip","configuration":{"level":12}}"#).unwrap()).is_err());
    }

    #[test]
    fn codec_gzip_default_level() {
        let codec = create_codec_gzip(&Metadata::new(IDENTIFIER)).unwrap();
        assert_eq!(
            serde_json::to_string(&codec.create_metadata()).unwrap(),
            r#"{"name":"gzip","configuration":{"level":5}}"#
        );
        assert!(GzipCodec::new(10).is_err());
    }

    #[test]
    fn codec_gzip_round_trip() {
        for level in [0, 1, 9] {
            test_util::round_trip(&GzipCodec::new(level).unwrap());
        }
    }

    #[test]
    fn codec_gzip_header() {
        let codec = GzipCodec::new(5).unwrap();
        let encoded = codec.encode(vec![1, 2, 3]).unwrap();
        assert_eq!(&encoded[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn codec_gzip_rejects_zlib() {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&[1, 2, 3, 4]).unwrap();
        let zlib = encoder.finish().unwrap();
        let codec = GzipCodec::new(5).unwrap();
        assert!(matches!(
            codec.decode(zlib, &BytesRepresentation::FixedSize(4)),
            Err(CodecError::InvalidFraming(_))
        ));
    }

    #[test]
    fn codec_gzip_decoded_size_mismatch() {
        let codec = GzipCodec::new(5).unwrap();
        let encoded = codec.encode(vec![0; 16]).unwrap();
        assert!(matches!(
            codec.decode(encoded.clone(), &BytesRepresentation::FixedSize(15)),
            Err(CodecError::UnexpectedChunkDecodedSize(16, 15))
        ));
        assert!(matches!(
            codec.decode(encoded[..encoded.len() - 4].to_vec(), &BytesRepresentation::UnboundedSize),
            Err(CodecError::IOError(_))
        ));
    }
}
