//! Zarr data types.
//!
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#data-types>.

use derive_more::From;
use thiserror::Error;

use crate::metadata::{FillValueMetadata, Metadata};

use super::FillValue;

/// A data type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum DataType {
    /// `bool` Boolean, stored as a byte.
    Bool,
    /// `int8` Integer in `[-2^7, 2^7-1]`.
    Int8,
    /// `int16` Integer in `[-2^15, 2^15-1]`.
    Int16,
    /// `int32` Integer in `[-2^31, 2^31-1]`.
    Int32,
    /// `int64` Integer in `[-2^63, 2^63-1]`.
    Int64,
    /// `uint8` Integer in `[0, 2^8-1]`.
    UInt8,
    /// `uint16` Integer in `[0, 2^16-1]`.
    UInt16,
    /// `uint32` Integer in `[0, 2^32-1]`.
    UInt32,
    /// `uint64` Integer in `[0, 2^64-1]`.
    UInt64,
    /// `float32` IEEE 754 single-precision floating point: sign bit, 8 bits exponent, 23 bits mantissa.
    Float32,
    /// `float64` IEEE 754 double-precision floating point: sign bit, 11 bits exponent, 52 bits mantissa.
    Float64,
    /// `complex64` real and complex components are each IEEE 754 single-precision floating point.
    Complex64,
    /// `complex128` real and complex components are each IEEE 754 double-precision floating point.
    Complex128,
    /// A variable length UTF-8 encoded string.
    String,
    /// `S*` fixed length byte string, size given by * in bits, limited to be a multiple of 8.
    FixedString(usize), // the stored usize is the size in bytes
    /// `r*` raw bits, size given by * in bits, limited to be a multiple of 8.
    RawBits(usize), // the stored usize is the size in bytes
}

/// An unsupported data type error.
#[derive(Debug, Error, From)]
#[error("unsupported data type {_0}")]
pub struct UnsupportedDataTypeError(String);

/// A fill value metadata incompatibility error.
#[derive(Debug, Error)]
#[error("incompatible fill value {1} for data type {0}")]
pub struct IncompatibleFillValueMetadataError(String, FillValueMetadata);

/// The size of a data type.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DataTypeSize {
    /// Fixed size (in bytes).
    Fixed(usize),
    /// Variable sized.
    Variable,
}

impl DataType {
    /// Returns the identifier.
    #[must_use]
    pub const fn identifier(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt8 => "uint8",
            Self::UInt16 => "uint16",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::String => "string",
            Self::FixedString(_) => "S*",
            Self::RawBits(_) => "r*",
        }
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::FixedString(size) => format!("S{}", size * 8),
            Self::RawBits(size) => format!("r{}", size * 8),
            _ => self.identifier().to_string(),
        }
    }

    /// Returns the metadata.
    #[must_use]
    pub fn metadata(&self) -> Metadata {
        Metadata::new(&self.name())
    }

    /// Returns the [`DataTypeSize`].
    #[must_use]
    pub const fn size(&self) -> DataTypeSize {
        match self {
            Self::Bool | Self::Int8 | Self::UInt8 => DataTypeSize::Fixed(1),
            Self::Int16 | Self::UInt16 => DataTypeSize::Fixed(2),
            Self::Int32 | Self::UInt32 | Self::Float32 => DataTypeSize::Fixed(4),
            Self::Int64 | Self::UInt64 | Self::Float64 | Self::Complex64 => DataTypeSize::Fixed(8),
            Self::Complex128 => DataTypeSize::Fixed(16),
            Self::FixedString(size) | Self::RawBits(size) => DataTypeSize::Fixed(*size),
            Self::String => DataTypeSize::Variable,
        }
    }

    /// Returns the size in bytes of a fixed-size data type, otherwise returns [`None`].
    #[must_use]
    pub const fn fixed_size(&self) -> Option<usize> {
        match self.size() {
            DataTypeSize::Fixed(size) => Some(size),
            DataTypeSize::Variable => None,
        }
    }

    /// Returns true if the data type is a number (boolean, integer, float, or complex).
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        !matches!(self, Self::String | Self::FixedString(_) | Self::RawBits(_))
    }

    /// Create a data type from metadata.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedDataTypeError`] if the metadata name is not a known data type or it has a configuration.
    pub fn from_metadata(metadata: &Metadata) -> Result<Self, UnsupportedDataTypeError> {
        if !metadata.configuration_is_none_or_empty() {
            return Err(UnsupportedDataTypeError(metadata.to_string()));
        }
        Self::from_name(metadata.name())
    }

    /// Create a data type from its name, such as `int32` or `r16`.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedDataTypeError`] if `name` is not a known data type.
    pub fn from_name(name: &str) -> Result<Self, UnsupportedDataTypeError> {
        match name {
            "bool" => return Ok(Self::Bool),
            "int8" => return Ok(Self::Int8),
            "int16" => return Ok(Self::Int16),
            "int32" => return Ok(Self::Int32),
            "int64" => return Ok(Self::Int64),
            "uint8" => return Ok(Self::UInt8),
            "uint16" => return Ok(Self::UInt16),
            "uint32" => return Ok(Self::UInt32),
            "uint64" => return Ok(Self::UInt64),
            "float32" => return Ok(Self::Float32),
            "float64" => return Ok(Self::Float64),
            "complex64" => return Ok(Self::Complex64),
            "complex128" => return Ok(Self::Complex128),
            "string" => return Ok(Self::String),
            _ => {}
        };

        let size_bytes = |bits: &str| {
            bits.parse::<usize>()
                .ok()
                .filter(|bits| *bits > 0 && bits % 8 == 0)
                .map(|bits| bits / 8)
        };
        if let Some(size) = name.strip_prefix('r').and_then(size_bytes) {
            return Ok(Self::RawBits(size));
        }
        if let Some(size) = name.strip_prefix('S').and_then(size_bytes) {
            return Ok(Self::FixedString(size));
        }

        Err(UnsupportedDataTypeError(name.to_string()))
    }

    /// Create a fill value from metadata.
    ///
    /// A `null` fill value is all zero bytes for fixed size data types and empty for variable sized data types.
    ///
    /// # Errors
    ///
    /// Returns [`IncompatibleFillValueMetadataError`] if the fill value is incompatible with the data type.
    #[allow(clippy::cast_possible_truncation)]
    pub fn fill_value_from_metadata(
        &self,
        fill_value: &FillValueMetadata,
    ) -> Result<FillValue, IncompatibleFillValueMetadataError> {
        use FillValue as FV;
        use FillValueMetadata as FVM;
        let err = || IncompatibleFillValueMetadataError(self.name(), fill_value.clone());
        let int = |fill_value: &FVM| match fill_value {
            FVM::Int(int) => Some(*int),
            _ => None,
        };
        if fill_value == &FVM::Null {
            return Ok(FV::new(vec![0; self.fixed_size().unwrap_or_default()]));
        }
        match self {
            Self::Bool => match fill_value {
                FVM::Bool(value) => Ok(FV::from(*value)),
                _ => Err(err()),
            },
            Self::Int8 => Ok(FV::from(int(fill_value).and_then(|i| i8::try_from(i).ok()).ok_or_else(err)?)),
            Self::Int16 => Ok(FV::from(int(fill_value).and_then(|i| i16::try_from(i).ok()).ok_or_else(err)?)),
            Self::Int32 => Ok(FV::from(int(fill_value).and_then(|i| i32::try_from(i).ok()).ok_or_else(err)?)),
            Self::Int64 => Ok(FV::from(int(fill_value).ok_or_else(err)?)),
            Self::UInt8 => Ok(FV::from(int(fill_value).and_then(|i| u8::try_from(i).ok()).ok_or_else(err)?)),
            Self::UInt16 => Ok(FV::from(int(fill_value).and_then(|i| u16::try_from(i).ok()).ok_or_else(err)?)),
            Self::UInt32 => Ok(FV::from(int(fill_value).and_then(|i| u32::try_from(i).ok()).ok_or_else(err)?)),
            Self::UInt64 => Ok(FV::from(int(fill_value).and_then(|i| u64::try_from(i).ok()).ok_or_else(err)?)),
            Self::Float32 => Ok(FV::from(fill_value.as_f64().ok_or_else(err)? as f32)),
            Self::Float64 => Ok(FV::from(fill_value.as_f64().ok_or_else(err)?)),
            Self::Complex64 => {
                let re = fill_value.as_f64().ok_or_else(err)? as f32;
                Ok(FV::from_complex64(re, 0.0))
            }
            Self::Complex128 => {
                let re = fill_value.as_f64().ok_or_else(err)?;
                Ok(FV::from_complex128(re, 0.0))
            }
            Self::String => match fill_value {
                FVM::String(string) => Ok(FV::new(string.as_bytes().to_vec())),
                _ => Err(err()),
            },
            Self::FixedString(size) => match fill_value {
                FVM::String(string) if string.len() <= *size => {
                    let mut bytes = string.as_bytes().to_vec();
                    bytes.resize(*size, 0);
                    Ok(FV::new(bytes))
                }
                _ => Err(err()),
            },
            Self::RawBits(size) => match fill_value {
                FVM::Int(0) => Ok(FV::new(vec![0; *size])),
                _ => Err(err()),
            },
        }
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<&Metadata> for DataType {
    type Error = UnsupportedDataTypeError;

    fn try_from(metadata: &Metadata) -> Result<Self, Self::Error> {
        Self::from_metadata(metadata)
    }
}

impl TryFrom<&str> for DataType {
    type Error = UnsupportedDataTypeError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::from_name(name)
    }
}
