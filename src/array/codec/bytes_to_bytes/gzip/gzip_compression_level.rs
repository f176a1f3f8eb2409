use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A gzip compression level, an integer from 0 to 9.
///
/// Lower levels are faster, higher levels compress more.
#[derive(Serialize, Copy, Clone, Eq, PartialEq, Debug)]
pub struct GzipCompressionLevel(u32);

/// An invalid gzip compression level error.
#[derive(Debug, Error)]
#[error("invalid gzip compression level {0}, must be 0-9")]
pub struct GzipCompressionLevelError(u32);

impl Default for GzipCompressionLevel {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u32> for GzipCompressionLevel {
    type Error = GzipCompressionLevelError;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        if level <= 9 {
            Ok(Self(level))
        } else {
            Err(GzipCompressionLevelError(level))
        }
    }
}

impl<'de> Deserialize<'de> for GzipCompressionLevel {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(d)?;
        if let Some(level) = number.as_u64() {
            if level <= 9 {
                #[allow(clippy::cast_possible_truncation)]
                return Ok(Self(level as u32));
            }
        }
        Err(serde::de::Error::custom(
            "gzip compression level must be an integer between 0 and 9",
        ))
    }
}

impl GzipCompressionLevel {
    /// Returns the compression level as a [`u32`].
    #[must_use]
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}
