//! The `identity` bytes to bytes codec.
//!
//! Passes bytes through unchanged.

mod identity_codec;

pub use identity_codec::IdentityCodec;

use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::{
    array::codec::{Codec, CodecPlugin},
    metadata::Metadata,
    plugin::{PluginCreateError, PluginMetadataInvalidError},
};

/// The identifier for the `identity` codec.
pub const IDENTIFIER: &str = "identity";

// Register the codec.
inventory::submit! {
    CodecPlugin::new(IDENTIFIER, is_name_identity, create_codec_identity)
}

fn is_name_identity(name: &str) -> bool {
    name.eq(IDENTIFIER)
}

pub(crate) fn create_codec_identity(metadata: &Metadata) -> Result<Codec, PluginCreateError> {
    let _configuration: IdentityCodecConfiguration = metadata
        .to_configuration()
        .map_err(|_| PluginMetadataInvalidError::new(IDENTIFIER, "codec", metadata.clone()))?;
    Ok(Codec::BytesToBytes(Box::new(IdentityCodec::new())))
}

/// A wrapper to handle various versions of `identity` codec configuration parameters.
#[derive(Serialize, Deserialize, Clone, Eq, PartialEq, Debug, From)]
#[serde(untagged)]
pub enum IdentityCodecConfiguration {
    /// Version 1.0.
    V1(IdentityCodecConfigurationV1),
}

/// Configuration parameters for the `identity` codec (version 1.0). There are none.
#[derive(Serialize, Deserialize, Clone, Eq, PartialEq, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct IdentityCodecConfigurationV1 {}

#[cfg(test)]
mod tests {
    use crate::array::codec::bytes_to_bytes::test_util;

    use super::*;

    #[test]
    fn codec_identity_round_trip() {
        test_util::round_trip(&IdentityCodec::new());
    }

    #[test]
    fn codec_identity_configuration() {
        assert!(create_codec_identity(&Metadata::new(IDENTIFIER)).is_ok());
        let metadata =
            Metadata::try_from(r#"{"name":"identity","configuration":{"level":1}}"#).unwrap();
        assert!(create_codec_identity(&metadata).is_err());
    }
}
