//! Zarr fill values.
//!
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#fill-value>.

/// The fill value of the Zarr array.
///
/// The little endian byte representation of an element, used for chunks which have not been written.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FillValue(Vec<u8>);

impl core::fmt::Display for FillValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<Vec<u8>> for FillValue {
    fn from(value: Vec<u8>) -> Self {
        FillValue(value)
    }
}

impl From<bool> for FillValue {
    fn from(value: bool) -> Self {
        FillValue(vec![u8::from(value)])
    }
}

macro_rules! fill_value_from_number {
    ( $( $t:ty ),* ) => {
        $(
            impl From<$t> for FillValue {
                fn from(value: $t) -> Self {
                    FillValue(value.to_le_bytes().to_vec())
                }
            }
        )*
    };
}

fill_value_from_number!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl FillValue {
    /// Create a new fill value composed of little endian `bytes`.
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> FillValue {
        FillValue(bytes)
    }

    /// Create a `complex64` fill value from its real and imaginary components.
    #[must_use]
    pub fn from_complex64(re: f32, im: f32) -> FillValue {
        let mut bytes = Vec::with_capacity(8);
        bytes.extend(re.to_le_bytes());
        bytes.extend(im.to_le_bytes());
        FillValue(bytes)
    }

    /// Create a `complex128` fill value from its real and imaginary components.
    #[must_use]
    pub fn from_complex128(re: f64, im: f64) -> FillValue {
        let mut bytes = Vec::with_capacity(16);
        bytes.extend(re.to_le_bytes());
        bytes.extend(im.to_le_bytes());
        FillValue(bytes)
    }

    /// Returns the size in bytes of the fill value.
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Return the little endian byte representation of the fill value.
    #[must_use]
    pub fn as_le_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Return the fill value repeated `num_elements` times.
    #[must_use]
    pub fn broadcast(&self, num_elements: usize) -> Vec<u8> {
        self.0.repeat(num_elements)
    }

    /// Check if the bytes are equal to a sequence of the fill value.
    #[must_use]
    pub fn equals_all(&self, bytes: &[u8]) -> bool {
        if self.0.is_empty() {
            return bytes.is_empty();
        }
        bytes.len() % self.0.len() == 0
            && bytes
                .chunks_exact(self.0.len())
                .all(|element| element == self.0.as_slice())
    }
}
