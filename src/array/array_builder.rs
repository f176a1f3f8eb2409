use std::sync::Arc;

use crate::metadata::{ArrayMetadata, FillValueMetadata};

use super::{
    chunk_key_encoding::{ChunkKeyEncoding, DefaultChunkKeyEncoding},
    codec::{ArrayToBytesCodecTraits, BytesCodec, BytesToBytesCodecTraits, CodecChain},
    Array, ArrayCreateError, ArrayShape, ChunkGrid, ChunkKeySeparator, DataType,
};

/// An [`Array`] builder.
///
/// The array builder is initialised from an array shape, data type, chunk grid, and fill value.
///  - The only codec enabled by default is `bytes` (little endian), so the output is uncompressed.
///  - The default chunk key encoding is `default` with the `/` chunk key separator.
///  - Attributes and dimension names are empty.
///
/// Use the methods in the array builder to change the configuration away from these defaults, and then build the array at a path of some storage with [`ArrayBuilder::build`].
/// Note that [`build`](ArrayBuilder::build) does not modify the store; the array metadata has to be explicitly written with [`Array::store_metadata`].
///
/// For example:
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # use std::sync::Arc;
/// use zarrs_lite::array::{ArrayBuilder, DataType};
/// # let store = Arc::new(zarrs_lite::storage::store::MemoryStore::new());
/// let array = ArrayBuilder::new(
///     vec![8, 8], // array shape
///     DataType::Float32,
///     vec![4, 4], // regular chunk shape (elements must be non-zero)
///     f32::NAN.into(),
/// )
/// .bytes_to_bytes_codecs(vec![
///     Box::new(zarrs_lite::array::codec::GzipCodec::new(5)?),
/// ])
/// .dimension_names(Some(vec!["y".to_string(), "x".to_string()]))
/// .build(store.clone(), "/group/array")?;
/// array.store_metadata()?; // write metadata to the store
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ArrayBuilder {
    /// Array shape.
    pub shape: ArrayShape,
    /// Data type.
    pub data_type: DataType,
    /// Chunk grid.
    pub chunk_grid: ChunkGrid,
    /// Chunk key encoding.
    pub chunk_key_encoding: ChunkKeyEncoding,
    /// Fill value.
    pub fill_value: FillValueMetadata,
    /// Array to bytes codec.
    pub array_to_bytes_codec: Option<Box<dyn ArrayToBytesCodecTraits>>,
    /// Bytes to bytes codecs.
    pub bytes_to_bytes_codecs: Vec<Box<dyn BytesToBytesCodecTraits>>,
    /// Attributes.
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
    /// Dimension names.
    pub dimension_names: Option<Vec<String>>,
}

impl ArrayBuilder {
    /// Create a new array builder.
    ///
    /// `chunk_grid` accepts a [`ChunkGrid`] or a regular chunk shape.
    #[must_use]
    pub fn new(
        shape: ArrayShape,
        data_type: DataType,
        chunk_grid: impl Into<ChunkGrid>,
        fill_value: FillValueMetadata,
    ) -> Self {
        Self {
            shape,
            data_type,
            chunk_grid: chunk_grid.into(),
            chunk_key_encoding: DefaultChunkKeyEncoding::default().into(),
            fill_value,
            array_to_bytes_codec: Some(Box::<BytesCodec>::default()),
            bytes_to_bytes_codecs: Vec::default(),
            attributes: None,
            dimension_names: None,
        }
    }

    /// Create a new builder copying the configuration of an existing array.
    #[must_use]
    pub fn from_array<T: ?Sized>(array: &Array<T>) -> Self {
        let metadata = array.metadata();
        let mut builder = Self::new(
            metadata.shape.clone(),
            *array.data_type(),
            array.chunk_grid().clone(),
            metadata.fill_value.clone(),
        );
        builder
            .attributes(metadata.attributes.clone())
            .chunk_key_encoding(array.chunk_key_encoding().clone())
            .dimension_names(metadata.dimension_names.clone())
            .array_to_bytes_codec(array.codecs().array_to_bytes_codec().map(dyn_clone::clone_box))
            .bytes_to_bytes_codecs(array.codecs().bytes_to_bytes_codecs().to_vec());
        builder
    }

    /// Set the shape.
    pub fn shape(&mut self, shape: ArrayShape) -> &mut Self {
        self.shape = shape;
        self
    }

    /// Set the data type.
    pub fn data_type(&mut self, data_type: DataType) -> &mut Self {
        self.data_type = data_type;
        self
    }

    /// Set the chunk grid.
    pub fn chunk_grid(&mut self, chunk_grid: impl Into<ChunkGrid>) -> &mut Self {
        self.chunk_grid = chunk_grid.into();
        self
    }

    /// Set the fill value.
    pub fn fill_value(&mut self, fill_value: FillValueMetadata) -> &mut Self {
        self.fill_value = fill_value;
        self
    }

    /// Set the chunk key encoding.
    ///
    /// If left unmodified, the array will use `default` chunk key encoding with the `/` chunk key separator.
    pub fn chunk_key_encoding(&mut self, chunk_key_encoding: ChunkKeyEncoding) -> &mut Self {
        self.chunk_key_encoding = chunk_key_encoding;
        self
    }

    /// Set the chunk key encoding to default with `separator`.
    ///
    /// If left unmodified, the array will use `default` chunk key encoding with the `/` chunk key separator.
    pub fn chunk_key_encoding_default_separator(
        &mut self,
        separator: ChunkKeySeparator,
    ) -> &mut Self {
        self.chunk_key_encoding = DefaultChunkKeyEncoding::new(separator).into();
        self
    }

    /// Set the array to bytes codec.
    ///
    /// If left unmodified, the array will use the `bytes` codec with little endian encoding.
    /// With [`None`], the element bytes are passed directly to the bytes to bytes codecs.
    pub fn array_to_bytes_codec(
        &mut self,
        array_to_bytes_codec: Option<Box<dyn ArrayToBytesCodecTraits>>,
    ) -> &mut Self {
        self.array_to_bytes_codec = array_to_bytes_codec;
        self
    }

    /// Set the bytes to bytes codecs.
    ///
    /// If left unmodified, the array will have no bytes to bytes codecs.
    pub fn bytes_to_bytes_codecs(
        &mut self,
        bytes_to_bytes_codecs: Vec<Box<dyn BytesToBytesCodecTraits>>,
    ) -> &mut Self {
        self.bytes_to_bytes_codecs = bytes_to_bytes_codecs;
        self
    }

    /// Set the user defined attributes.
    ///
    /// If left unmodified, the user defined attributes of the array will be empty.
    pub fn attributes(
        &mut self,
        attributes: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> &mut Self {
        self.attributes = attributes;
        self
    }

    /// Set the dimension names.
    ///
    /// If left unmodified, all dimension names are "unnamed".
    pub fn dimension_names(&mut self, dimension_names: Option<Vec<String>>) -> &mut Self {
        self.dimension_names = dimension_names;
        self
    }

    /// Build into array metadata.
    #[must_use]
    pub fn build_metadata(&self) -> ArrayMetadata {
        let codecs = CodecChain::new(
            self.array_to_bytes_codec.clone(),
            self.bytes_to_bytes_codecs.clone(),
        );
        ArrayMetadata::new(
            self.shape.clone(),
            self.data_type.metadata(),
            self.chunk_grid.create_metadata(),
            self.chunk_key_encoding.create_metadata(),
            self.fill_value.clone(),
            codecs.create_metadatas(),
        )
        .with_attributes(self.attributes.clone())
        .with_dimension_names(self.dimension_names.clone())
    }

    /// Build into an [`Array`].
    ///
    /// # Errors
    ///
    /// Returns [`ArrayCreateError`] if there is an error creating the array.
    /// This can be due to a storage error, an invalid path, or a problem with array configuration.
    pub fn build<TStorage: ?Sized>(
        &self,
        storage: Arc<TStorage>,
        path: &str,
    ) -> Result<Array<TStorage>, ArrayCreateError> {
        Array::new_with_metadata(storage, path, self.build_metadata())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::store::MemoryStore;

    use super::*;

    #[test]
    fn array_builder() {
        let mut builder = ArrayBuilder::new(vec![8, 8], DataType::Int8, vec![2, 2], 0i64.into());
        builder.chunk_key_encoding_default_separator(ChunkKeySeparator::Dot);
        builder.dimension_names(Some(vec!["y".to_string(), "x".to_string()]));
        let mut attributes = serde_json::Map::new();
        attributes.insert("key".to_string(), "value".into());
        builder.attributes(Some(attributes.clone()));

        let storage = Arc::new(MemoryStore::new());
        let array = builder.build(storage, "/").unwrap();
        assert_eq!(array.shape(), &[8, 8]);
        assert_eq!(array.data_type(), &DataType::Int8);
        assert_eq!(array.chunk_grid_shape(), vec![4, 4]);
        assert_eq!(array.chunk_key(&[1, 2]).as_str(), "c.1.2");
        assert_eq!(array.attributes(), Some(&attributes));
        assert_eq!(
            array.dimension_names(),
            Some(["y".to_string(), "x".to_string()].as_slice())
        );
        assert_eq!(array.codecs().len(), 1);

        let builder2 = ArrayBuilder::from_array(&array);
        assert_eq!(builder2.build_metadata(), *array.metadata());
    }

    #[test]
    fn array_builder_metadata() {
        let metadata = ArrayBuilder::new(vec![10, 20], DataType::Int32, vec![5, 5], 0i64.into())
            .build_metadata();
        assert_eq!(
            serde_json::to_value(&metadata).unwrap(),
            serde_json::json!({
                "zarr_format": 3,
                "node_type": "array",
                "shape": [10, 20],
                "data_type": "int32",
                "chunk_grid": {"name": "regular", "configuration": {"chunk_shape": [5, 5]}},
                "chunk_key_encoding": {"name": "default", "configuration": {"separator": "/"}},
                "fill_value": 0,
                "codecs": [{"name": "bytes", "configuration": {"endian": "little"}}]
            })
        );
    }

    #[test]
    fn array_builder_invalid() {
        let storage = Arc::new(MemoryStore::new());
        assert!(matches!(
            ArrayBuilder::new(vec![8, 8], DataType::Int8, vec![2], 0i64.into())
                .build(storage.clone(), "/"),
            Err(ArrayCreateError::InvalidChunkGridDimensionality(1, 2))
        ));
        assert!(matches!(
            ArrayBuilder::new(vec![8], DataType::UInt8, vec![2], (-1i64).into())
                .build(storage.clone(), "/"),
            Err(ArrayCreateError::InvalidFillValue(_))
        ));
        assert!(matches!(
            ArrayBuilder::new(vec![8], DataType::UInt8, vec![2], 0i64.into())
                .dimension_names(Some(vec![]))
                .build(storage, "/"),
            Err(ArrayCreateError::InvalidDimensionNames(0, 1))
        ));
    }
}
