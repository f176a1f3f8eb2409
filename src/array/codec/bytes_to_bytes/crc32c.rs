//! The `crc32c` (CRC32C checksum) bytes to bytes codec.
//!
//! Appends a little endian CRC32C checksum of the input bytestream.
//!
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/codecs/crc32c/v1.0.html>.

mod crc32c_codec;
mod crc32c_configuration;

pub use crc32c_codec::Crc32cCodec;
pub use crc32c_configuration::{Crc32cCodecConfiguration, Crc32cCodecConfigurationV1};

use crate::{
    array::codec::{Codec, CodecPlugin},
    metadata::Metadata,
    plugin::{PluginCreateError, PluginMetadataInvalidError},
};

/// The identifier for the `crc32c` codec.
pub const IDENTIFIER: &str = "crc32c";

// Register the codec.
inventory::submit! {
    CodecPlugin::new(IDENTIFIER, is_name_crc32c, create_codec_crc32c)
}

fn is_name_crc32c(name: &str) -> bool {
    name.eq(IDENTIFIER)
}

pub(crate) fn create_codec_crc32c(metadata: &Metadata) -> Result<Codec, PluginCreateError> {
    let configuration: Crc32cCodecConfiguration = metadata
        .to_configuration()
        .map_err(|_| PluginMetadataInvalidError::new(IDENTIFIER, "codec", metadata.clone()))?;
    let codec = Box::new(Crc32cCodec::new_with_configuration(&configuration));
    Ok(Codec::BytesToBytes(codec))
}

const CHECKSUM_SIZE: usize = core::mem::size_of::<u32>();
