use serde::{Deserialize, Serialize};

use super::{FillValueMetadata, Metadata, ZARR_FORMAT};

/// Zarr V3 array metadata.
///
/// An example `JSON` document for an array:
/// ```json
/// {
///     "zarr_format": 3,
///     "node_type": "array",
///     "shape": [10, 20],
///     "data_type": "int32",
///     "chunk_grid": {
///         "name": "regular",
///         "configuration": {
///             "chunk_shape": [5, 5]
///         }
///     },
///     "chunk_key_encoding": {
///         "name": "default",
///         "configuration": {
///             "separator": "/"
///         }
///     },
///     "fill_value": 0,
///     "codecs": [
///         { "name": "bytes", "configuration": { "endian": "little" } },
///         { "name": "crc32c", "configuration": {} }
///     ],
///     "attributes": {
///         "units": "kelvin"
///     },
///     "dimension_names": ["y", "x"]
/// }
/// ```
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ArrayMetadata {
    /// An integer defining the version of the storage specification to which the array adheres. Must be `3`.
    #[serde(default = "zarr_format_default")]
    pub zarr_format: usize,
    /// A string defining the type of hierarchy node element, must be `array` here.
    #[serde(default = "node_type_array")]
    pub node_type: String,
    /// The length of each dimension of the array.
    pub shape: Vec<u64>,
    /// The data type of the array.
    pub data_type: Metadata,
    /// The chunk grid of the array.
    pub chunk_grid: Metadata,
    /// The mapping from chunk grid cell coordinates to keys in the underlying store.
    pub chunk_key_encoding: Metadata,
    /// The value of elements in chunks which have not been written.
    pub fill_value: FillValueMetadata,
    /// The ordered list of codecs applied to each chunk when it is encoded.
    pub codecs: Vec<Metadata>,
    /// Optional user defined attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
    /// An optional list of dimension names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_names: Option<Vec<String>>,
}

const fn zarr_format_default() -> usize {
    ZARR_FORMAT
}

fn node_type_array() -> String {
    "array".to_string()
}

impl ArrayMetadata {
    /// Create new array metadata.
    #[must_use]
    pub fn new(
        shape: Vec<u64>,
        data_type: Metadata,
        chunk_grid: Metadata,
        chunk_key_encoding: Metadata,
        fill_value: FillValueMetadata,
        codecs: Vec<Metadata>,
    ) -> Self {
        Self {
            zarr_format: ZARR_FORMAT,
            node_type: node_type_array(),
            shape,
            data_type,
            chunk_grid,
            chunk_key_encoding,
            fill_value,
            codecs,
            attributes: None,
            dimension_names: None,
        }
    }

    /// Set the user defined attributes.
    #[must_use]
    pub fn with_attributes(
        mut self,
        attributes: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the dimension names.
    #[must_use]
    pub fn with_dimension_names(mut self, dimension_names: Option<Vec<String>>) -> Self {
        self.dimension_names = dimension_names;
        self
    }

    /// Validates that the `zarr_format` field is `3`.
    #[must_use]
    pub fn validate_format(&self) -> bool {
        self.zarr_format == ZARR_FORMAT
    }

    /// Validates that the `node_type` is `"array"`.
    #[must_use]
    pub fn validate_node_type(&self) -> bool {
        self.node_type == "array"
    }
}
