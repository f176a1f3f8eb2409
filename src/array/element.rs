//! Typed array elements.
//!
//! An [`Element`] converts a slice of values to the little-endian bytes of a chunk and back.
//! The conversion is selected once from the element type, and checked against the [`DataType`] of an array before any bytes are touched.

use super::{ArrayError, DataType};

/// A type which can be read from or written to an array with a compatible [`DataType`].
pub trait Element: Sized + Copy + Send + Sync {
    /// Validate the data type.
    ///
    /// # Errors
    /// Returns [`ArrayError::IncompatibleElementType`] if the element type is incompatible with `data_type`.
    fn validate_data_type(data_type: &DataType) -> Result<(), ArrayError>;

    /// Convert elements to their little-endian bytes.
    ///
    /// # Errors
    /// Returns [`ArrayError::IncompatibleElementType`] if the element type is incompatible with `data_type`.
    fn into_array_bytes(data_type: &DataType, elements: &[Self]) -> Result<Vec<u8>, ArrayError>;

    /// Convert little-endian bytes to elements.
    ///
    /// # Errors
    /// Returns an [`ArrayError`] if the element type is incompatible with `data_type` or `bytes` do not hold valid element values.
    fn from_array_bytes(data_type: &DataType, bytes: &[u8]) -> Result<Vec<Self>, ArrayError>;
}

fn incompatible<T>(data_type: &DataType) -> ArrayError {
    ArrayError::IncompatibleElementType(*data_type, std::any::type_name::<T>())
}

macro_rules! impl_element_pod {
    ($raw_type:ty, $($data_type:path),+) => {
        impl Element for $raw_type {
            fn validate_data_type(data_type: &DataType) -> Result<(), ArrayError> {
                match data_type {
                    $($data_type)|+ => Ok(()),
                    _ => Err(incompatible::<Self>(data_type)),
                }
            }

            fn into_array_bytes(
                data_type: &DataType,
                elements: &[Self],
            ) -> Result<Vec<u8>, ArrayError> {
                Self::validate_data_type(data_type)?;
                Ok(elements.iter().flat_map(|element| element.to_le_bytes()).collect())
            }

            fn from_array_bytes(
                data_type: &DataType,
                bytes: &[u8],
            ) -> Result<Vec<Self>, ArrayError> {
                Self::validate_data_type(data_type)?;
                const SIZE: usize = core::mem::size_of::<$raw_type>();
                if bytes.len() % SIZE != 0 {
                    return Err(ArrayError::InvalidDataLength(bytes.len(), bytes.len() / SIZE * SIZE));
                }
                Ok(bytes
                    .chunks_exact(SIZE)
                    .map(|chunk| {
                        let mut element = [0u8; SIZE];
                        element.copy_from_slice(chunk);
                        <$raw_type>::from_le_bytes(element)
                    })
                    .collect())
            }
        }
    };
}

impl_element_pod!(i8, DataType::Int8);
impl_element_pod!(i16, DataType::Int16);
impl_element_pod!(i32, DataType::Int32);
impl_element_pod!(i64, DataType::Int64);
impl_element_pod!(u8, DataType::UInt8);
impl_element_pod!(u16, DataType::UInt16);
impl_element_pod!(u32, DataType::UInt32);
impl_element_pod!(u64, DataType::UInt64);
impl_element_pod!(f32, DataType::Float32);
impl_element_pod!(f64, DataType::Float64);

impl Element for bool {
    fn validate_data_type(data_type: &DataType) -> Result<(), ArrayError> {
        match data_type {
            DataType::Bool => Ok(()),
            _ => Err(incompatible::<Self>(data_type)),
        }
    }

    fn into_array_bytes(data_type: &DataType, elements: &[Self]) -> Result<Vec<u8>, ArrayError> {
        Self::validate_data_type(data_type)?;
        Ok(elements.iter().map(|element| u8::from(*element)).collect())
    }

    fn from_array_bytes(data_type: &DataType, bytes: &[u8]) -> Result<Vec<Self>, ArrayError> {
        Self::validate_data_type(data_type)?;
        bytes
            .iter()
            .map(|byte| match byte {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(ArrayError::InvalidElementValue(
                    *data_type,
                    byte.to_string(),
                )),
            })
            .collect()
    }
}

impl<const N: usize> Element for [u8; N] {
    fn validate_data_type(data_type: &DataType) -> Result<(), ArrayError> {
        match data_type {
            DataType::RawBits(size) | DataType::FixedString(size) if *size == N => Ok(()),
            _ => Err(incompatible::<Self>(data_type)),
        }
    }

    fn into_array_bytes(data_type: &DataType, elements: &[Self]) -> Result<Vec<u8>, ArrayError> {
        Self::validate_data_type(data_type)?;
        Ok(elements.concat())
    }

    fn from_array_bytes(data_type: &DataType, bytes: &[u8]) -> Result<Vec<Self>, ArrayError> {
        Self::validate_data_type(data_type)?;
        if N == 0 || bytes.len() % N != 0 {
            return Err(ArrayError::InvalidDataLength(bytes.len(), N));
        }
        Ok(bytes
            .chunks_exact(N)
            .map(|chunk| {
                let mut element = [0u8; N];
                element.copy_from_slice(chunk);
                element
            })
            .collect())
    }
}
