//! Zarr arrays.
//!
//! An array is a node in a Zarr hierarchy used to hold multidimensional array data and associated metadata.
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#array>.
//!
//! Use [`ArrayBuilder`] to setup a new array, or use [`Array::open`] for an existing array.
//! The documentation for [`Array`] details how to interact with arrays.

mod array_builder;
mod array_errors;
mod array_sync_readable;
mod array_sync_writable;
mod bytes_representation;
pub mod chunk_grid;
pub mod chunk_key_encoding;
pub mod codec;
pub mod data_type;
mod element;
mod fill_value;

use std::sync::Arc;

pub use self::{
    array_builder::ArrayBuilder,
    array_errors::{ArrayCreateError, ArrayError},
    bytes_representation::BytesRepresentation,
    chunk_grid::ChunkGrid,
    chunk_key_encoding::{ChunkKeyEncoding, ChunkKeySeparator},
    codec::CodecChain,
    data_type::{DataType, DataTypeSize},
    element::Element,
    fill_value::FillValue,
};

use crate::{
    metadata::ArrayMetadata,
    node::NodePath,
    storage::{data_key, StoreKey},
};

/// An ND index to an element or chunk in an array.
pub type ArrayIndices = Vec<u64>;

/// The shape of an array.
pub type ArrayShape = Vec<u64>;

/// A Zarr array.
///
/// See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#array-metadata>.
///
/// ### Metadata
///
/// An array is defined by the following parameters (which are encoded in its JSON metadata):
///  - **shape**: defines the length of the array dimensions,
///  - **data type**: defines the numerical representation array elements,
///  - **chunk grid**: defines how the array is subdivided into chunks,
///  - **chunk key encoding**: defines how chunk grid cell coordinates are mapped to keys in a store,
///  - **fill value**: an element value to use for uninitialised portions of the array.
///  - **codecs**: used to encode and decode chunks,
///
/// and optional parameters:
///  - **attributes**: user-defined attributes, and
///  - **dimension names**: defines the names of the array dimensions.
///
/// The metadata is validated when an array is created or opened and is not mutated afterwards.
///
/// ### Initialisation
///
/// A *new* array can be initialised with an [`ArrayBuilder`] or [`Array::new_with_metadata`].
/// Its metadata has to be written explicitly with [`store_metadata`](Array::store_metadata), or use [`Array::create`] to do both.
///
/// An *existing* array can be initialised with [`Array::open`], its metadata is read from the store.
///
/// ### Chunks
///  - [`write_chunk`](Array::write_chunk) / [`store_chunk_bytes`](Array::store_chunk_bytes): encode and write a chunk.
///  - [`read_chunk`](Array::read_chunk) / [`retrieve_chunk_bytes`](Array::retrieve_chunk_bytes): read and decode a chunk.
///    A chunk which has never been written reads as the fill value.
///  - [`erase_chunk`](Array::erase_chunk): delete a chunk.
///
/// Chunk indices are validated against the chunk grid before the store is accessed.
/// Chunks are independent store values, so writing many chunks is not atomic.
#[derive(Debug, Clone)]
pub struct Array<TStorage: ?Sized> {
    /// The storage.
    storage: Arc<TStorage>,
    /// The path of the array in a store.
    path: NodePath,
    /// The metadata, as written to or read from the store.
    metadata: ArrayMetadata,
    /// The data type of the Zarr array.
    data_type: DataType,
    /// The chunk grid of the Zarr array.
    chunk_grid: ChunkGrid,
    /// The mapping from chunk grid cell coordinates to keys in the underlying store.
    chunk_key_encoding: ChunkKeyEncoding,
    /// The little-endian bytes of the fill value.
    fill_value: FillValue,
    /// The codecs used for encoding and decoding chunks.
    codecs: CodecChain,
}

impl<TStorage: ?Sized> Array<TStorage> {
    /// Create an array in `storage` at `path` with `metadata`.
    /// This does **not** write to the store, use [`store_metadata`](Array::store_metadata) to write `metadata` to `storage`.
    ///
    /// # Errors
    /// Returns [`ArrayCreateError`] if:
    ///  - any metadata is invalid or,
    ///  - a plugin (e.g. data type/chunk grid/chunk key encoding/codec) is invalid.
    pub fn new_with_metadata(
        storage: Arc<TStorage>,
        path: &str,
        metadata: ArrayMetadata,
    ) -> Result<Self, ArrayCreateError> {
        let path = NodePath::new(path)?;

        if !metadata.validate_format() {
            return Err(ArrayCreateError::InvalidZarrFormat(metadata.zarr_format));
        }
        if !metadata.validate_node_type() {
            return Err(ArrayCreateError::InvalidNodeType(metadata.node_type));
        }
        let data_type = DataType::from_metadata(&metadata.data_type)?;
        let chunk_grid = ChunkGrid::from_metadata(&metadata.chunk_grid)
            .map_err(ArrayCreateError::ChunkGridCreateError)?;
        if chunk_grid.dimensionality() != metadata.shape.len() {
            return Err(ArrayCreateError::InvalidChunkGridDimensionality(
                chunk_grid.dimensionality(),
                metadata.shape.len(),
            ));
        }
        let fill_value = data_type.fill_value_from_metadata(&metadata.fill_value)?;
        let codecs = CodecChain::from_metadata(&metadata.codecs)
            .map_err(ArrayCreateError::CodecsCreateError)?;
        let chunk_key_encoding = ChunkKeyEncoding::from_metadata(&metadata.chunk_key_encoding)
            .map_err(ArrayCreateError::ChunkKeyEncodingCreateError)?;
        if let Some(dimension_names) = &metadata.dimension_names {
            if dimension_names.len() != metadata.shape.len() {
                return Err(ArrayCreateError::InvalidDimensionNames(
                    dimension_names.len(),
                    metadata.shape.len(),
                ));
            }
        }

        Ok(Self {
            storage,
            path,
            metadata,
            data_type,
            chunk_grid,
            chunk_key_encoding,
            fill_value,
            codecs,
        })
    }

    /// Get the underlying storage backing the array.
    #[must_use]
    pub fn storage(&self) -> Arc<TStorage> {
        self.storage.clone()
    }

    /// Get the node path.
    #[must_use]
    pub const fn path(&self) -> &NodePath {
        &self.path
    }

    /// Get the array metadata.
    #[must_use]
    pub const fn metadata(&self) -> &ArrayMetadata {
        &self.metadata
    }

    /// Get the array shape.
    #[must_use]
    pub fn shape(&self) -> &[u64] {
        &self.metadata.shape
    }

    /// Get the array dimensionality.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.metadata.shape.len()
    }

    /// Get the data type.
    #[must_use]
    pub const fn data_type(&self) -> &DataType {
        &self.data_type
    }

    /// Get the fill value.
    #[must_use]
    pub const fn fill_value(&self) -> &FillValue {
        &self.fill_value
    }

    /// Get the codecs.
    #[must_use]
    pub const fn codecs(&self) -> &CodecChain {
        &self.codecs
    }

    /// Get the chunk grid.
    #[must_use]
    pub const fn chunk_grid(&self) -> &ChunkGrid {
        &self.chunk_grid
    }

    /// Get the chunk key encoding.
    #[must_use]
    pub const fn chunk_key_encoding(&self) -> &ChunkKeyEncoding {
        &self.chunk_key_encoding
    }

    /// Get the attributes.
    #[must_use]
    pub const fn attributes(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        self.metadata.attributes.as_ref()
    }

    /// Get the dimension names.
    #[must_use]
    pub fn dimension_names(&self) -> Option<&[String]> {
        self.metadata.dimension_names.as_deref()
    }

    /// Return the shape of the chunk grid (i.e., the number of chunks along each dimension).
    #[must_use]
    pub fn chunk_grid_shape(&self) -> ArrayShape {
        // dimensionality is validated on creation
        self.chunk_grid
            .grid_shape(self.shape())
            .unwrap_or_default()
    }

    /// Return the key of the chunk at `chunk_indices`.
    ///
    /// The key is not validated against the chunk grid.
    #[must_use]
    pub fn chunk_key(&self, chunk_indices: &[u64]) -> StoreKey {
        data_key(self.path(), chunk_indices, &self.chunk_key_encoding)
    }

    /// Return the shape of the chunk at `chunk_indices`.
    ///
    /// # Errors
    /// Returns [`ArrayError::InvalidChunkGridIndicesError`] if the `chunk_indices` are incompatible with the chunk grid.
    pub fn chunk_shape(&self, chunk_indices: &[u64]) -> Result<ArrayShape, ArrayError> {
        self.validate_chunk_indices(chunk_indices)?;
        Ok(self.chunk_grid.chunk_shape(chunk_indices))
    }

    /// Check that `chunk_indices` address a chunk of this array.
    ///
    /// # Errors
    /// Returns [`ArrayError::InvalidChunkGridIndicesError`] if the dimensionality of `chunk_indices` does not match the array
    /// or an index is outside of the chunk grid.
    pub fn validate_chunk_indices(&self, chunk_indices: &[u64]) -> Result<(), ArrayError> {
        Ok(self
            .chunk_grid
            .validate_chunk_indices(chunk_indices, self.shape())?)
    }

    /// The number of elements and the decoded size in bytes of the chunk at `chunk_indices`.
    fn chunk_decoded_size(&self, chunk_indices: &[u64]) -> Result<(usize, usize), ArrayError> {
        let chunk_shape = self.chunk_shape(chunk_indices)?;
        let too_large = || {
            ArrayError::InvalidChunkGridIndicesError(chunk_grid::InvalidChunkGridIndicesError(
                chunk_indices.to_vec(),
                self.shape().to_vec(),
            ))
        };
        let num_elements = chunk_shape
            .iter()
            .try_fold(1usize, |acc, &size| {
                usize::try_from(size).ok().and_then(|size| acc.checked_mul(size))
            })
            .ok_or_else(too_large)?;
        let element_size = self.data_type.fixed_size().ok_or_else(|| {
            codec::CodecError::UnsupportedDataType(self.data_type, "chunk".to_string())
        })?;
        let num_bytes = num_elements
            .checked_mul(element_size)
            .ok_or_else(too_large)?;
        Ok((num_elements, num_bytes))
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::store::MemoryStore;

    use super::*;

    fn metadata(json: &str) -> ArrayMetadata {
        serde_json::from_str(json).unwrap()
    }

    const JSON: &str = r#"{
        "zarr_format": 3,
        "node_type": "array",
        "shape": [10, 20],
        "data_type": "int32",
        "chunk_grid": {"name": "regular", "configuration": {"chunk_shape": [5, 5]}},
        "chunk_key_encoding": {"name": "default", "configuration": {"separator": "."}},
        "fill_value": 7,
        "codecs": [{"name": "bytes", "configuration": {"endian": "little"}}],
        "dimension_names": ["y", "x"]
    }"#;

    #[test]
    fn array_new_with_metadata() {
        let store = Arc::new(MemoryStore::new());
        let array = Array::new_with_metadata(store, "/array", metadata(JSON)).unwrap();
        assert_eq!(array.shape(), &[10, 20]);
        assert_eq!(array.dimensionality(), 2);
        assert_eq!(array.data_type(), &DataType::Int32);
        assert_eq!(array.fill_value().as_le_bytes(), &7i32.to_le_bytes());
        assert_eq!(array.chunk_grid_shape(), vec![2, 4]);
        assert_eq!(array.chunk_key(&[1, 3]).as_str(), "array/c.1.3");
        assert_eq!(array.chunk_shape(&[1, 3]).unwrap(), vec![5, 5]);
        assert!(array.chunk_shape(&[2, 0]).is_err());
        assert_eq!(array.dimension_names(), Some(["y".to_string(), "x".to_string()].as_slice()));
        assert!(array.attributes().is_none());
        assert_eq!(array.codecs().len(), 1);
    }

    #[test]
    fn array_invalid_metadata() {
        let store = Arc::new(MemoryStore::new());
        let mut m = metadata(JSON);
        m.shape = vec![10];
        assert!(matches!(
            Array::new_with_metadata(store.clone(), "/", m),
            Err(ArrayCreateError::InvalidChunkGridDimensionality(2, 1))
        ));

        let mut m = metadata(JSON);
        m.dimension_names = Some(vec!["x".to_string()]);
        assert!(matches!(
            Array::new_with_metadata(store.clone(), "/", m),
            Err(ArrayCreateError::InvalidDimensionNames(1, 2))
        ));

        let mut m = metadata(JSON);
        m.zarr_format = 2;
        assert!(matches!(
            Array::new_with_metadata(store.clone(), "/", m),
            Err(ArrayCreateError::InvalidZarrFormat(2))
        ));

        let mut m = metadata(JSON);
        m.node_type = "group".to_string();
        assert!(matches!(
            Array::new_with_metadata(store.clone(), "/", m),
            Err(ArrayCreateError::InvalidNodeType(_))
        ));

        let mut m = metadata(JSON);
        m.data_type = Metadata::new("int3");
        assert!(matches!(
            Array::new_with_metadata(store.clone(), "/", m),
            Err(ArrayCreateError::DataTypeCreateError(_))
        ));

        let mut m = metadata(JSON);
        m.fill_value = "x".into();
        assert!(matches!(
            Array::new_with_metadata(store.clone(), "/", m),
            Err(ArrayCreateError::InvalidFillValue(_))
        ));

        let mut m = metadata(JSON);
        m.codecs = vec![Metadata::new("unknown")];
        assert!(matches!(
            Array::new_with_metadata(store.clone(), "/", m),
            Err(ArrayCreateError::CodecsCreateError(_))
        ));

        let mut m = metadata(JSON);
        m.chunk_key_encoding = Metadata::new("v2");
        assert!(matches!(
            Array::new_with_metadata(store.clone(), "/", m),
            Err(ArrayCreateError::ChunkKeyEncodingCreateError(_))
        ));

        assert!(matches!(
            Array::new_with_metadata(store, "/a/", metadata(JSON)),
            Err(ArrayCreateError::NodePathError(_))
        ));
    }

    use crate::metadata::Metadata;
}
