//! The `zstd` bytes to bytes codec.
//!
//! Applies [Zstandard](https://tools.ietf.org/html/rfc8878) compression.
//!
//! See <https://github.com/zarr-developers/zarr-specs/pull/256>.

mod zstd_codec;
mod zstd_configuration;

pub use zstd_codec::ZstdCodec;
pub use zstd_configuration::{
    ZstdCodecConfiguration, ZstdCodecConfigurationV1, ZstdCompressionLevel,
};

use crate::{
    array::codec::{Codec, CodecPlugin},
    metadata::Metadata,
    plugin::{PluginCreateError, PluginMetadataInvalidError},
};

/// The identifier for the `zstd` codec.
pub const IDENTIFIER: &str = "zstd";

// Register the codec.
inventory::submit! {
    CodecPlugin::new(IDENTIFIER, is_name_zstd, create_codec_zstd)
}

fn is_name_zstd(name: &str) -> bool {
    name.eq(IDENTIFIER)
}

pub(crate) fn create_codec_zstd(metadata: &Metadata) -> Result<Codec, PluginCreateError> {
    let configuration: ZstdCodecConfiguration = metadata
        .to_configuration()
        .map_err(|_| PluginMetadataInvalidError::new(IDENTIFIER, "codec", metadata.clone()))?;
    let codec = Box::new(ZstdCodec::new_with_configuration(&configuration));
    Ok(Codec::BytesToBytes(codec))
}

#[cfg(test)]
mod tests {
    use crate::array::{
        codec::{bytes_to_bytes::test_util, BytesToBytesCodecTraits, CodecError, CodecTraits},
        BytesRepresentation,
    };

    use super::*;

    const JSON_VALID: &str = r#"{
        "level": 22,
        "checksum": false
    }"#;

    #[test]
    fn codec_zstd_configuration() {
        let configuration: ZstdCodecConfiguration = serde_json::from_str(JSON_VALID).unwrap();
        let codec = ZstdCodec::new_with_configuration(&configuration);
        assert_eq!(
            serde_json::to_string(&codec.create_metadata()).unwrap(),
            r#"{"name":"zstd","configuration":{"level":22,"checksum":false}}"#
        );
        let codec = create_codec_zstd(&Metadata::new(IDENTIFIER)).unwrap();
        assert_eq!(
            serde_json::to_string(&codec.create_metadata()).unwrap(),
            r#"{"name":"zstd","configuration":{"level":3,"checksum":false}}"#
        );
    }

    #[test]
    fn codec_zstd_configuration_invalid() {
        assert!(serde_json::from_str::<ZstdCodecConfiguration>(r#"{"level": 23}"#).is_err());
        assert!(serde_json::from_str::<ZstdCodecConfiguration>(r#"{"level": -131073}"#).is_err());
        assert!(serde_json::from_str::<ZstdCodecConfiguration>(r#"{"level": 1, "extra": 0}"#).is_err());
        assert!(serde_json::from_str::<ZstdCodecConfiguration>(r#"{"level": -131072}"#).is_ok());
    }

    #[test]
    fn codec_zstd_round_trip() {
        test_util::round_trip(&ZstdCodec::new(3, false));
        test_util::round_trip(&ZstdCodec::new(1, true));
        test_util::round_trip(&ZstdCodec::new(-5, false));
    }

    #[test]
    fn codec_zstd_decoded_size_mismatch() {
        let codec = ZstdCodec::new(3, false);
        let encoded = codec.encode(vec![1; 64]).unwrap();
        assert!(matches!(
            codec.decode(encoded.clone(), &BytesRepresentation::FixedSize(32)),
            Err(CodecError::IOError(_))
        ));
        assert!(matches!(
            codec.decode(encoded, &BytesRepresentation::FixedSize(128)),
            Err(CodecError::UnexpectedChunkDecodedSize(64, 128))
        ));
    }

    #[test]
    fn codec_zstd_invalid_input() {
        let codec = ZstdCodec::new(3, true);
        let error = codec
            .decode(vec![0, 1, 2, 3, 4, 5], &BytesRepresentation::FixedSize(4))
            .unwrap_err();
        assert!(matches!(error, CodecError::IOError(_)));
        assert!(!error.to_string().is_empty());
    }
}
