//! Bytes to bytes codecs.

#[cfg(feature = "crc32c")]
pub mod crc32c;
#[cfg(feature = "gzip")]
pub mod gzip;
pub mod identity;
#[cfg(feature = "zstd")]
pub mod zstd;
