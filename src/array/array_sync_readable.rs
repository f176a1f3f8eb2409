use std::sync::Arc;

use crate::{
    metadata::ArrayMetadata,
    node::NodePath,
    storage::{meta_key, retrieve_chunk, ReadableStorageTraits},
};

use super::{
    codec::CodecError, Array, ArrayCreateError, ArrayError, BytesRepresentation, Element,
};

impl<TStorage: ?Sized + ReadableStorageTraits> Array<TStorage> {
    /// Open an existing array in `storage` at `path`.
    ///
    /// The metadata is read from `zarr.json` at `path` and validated before the array is returned.
    ///
    /// # Errors
    /// Returns [`ArrayCreateError`] if:
    ///  - `path` is invalid,
    ///  - there is no metadata at `path`,
    ///  - the metadata is not valid array metadata, or
    ///  - there is an underlying storage error.
    pub fn open(storage: Arc<TStorage>, path: &str) -> Result<Self, ArrayCreateError> {
        let node_path = NodePath::new(path)?;
        let key = meta_key(&node_path);
        let metadata = storage
            .get(&key)?
            .ok_or_else(|| ArrayCreateError::MissingMetadata(node_path.clone()))?;
        let metadata: ArrayMetadata = serde_json::from_slice(&metadata)?;
        log::debug!("opened array {node_path} with codecs {:?}", metadata.codecs);
        Self::new_with_metadata(storage, path, metadata)
    }

    /// Returns true if the chunk at `chunk_indices` has been written.
    ///
    /// # Errors
    /// Returns an [`ArrayError`] if `chunk_indices` are invalid or there is an underlying store error.
    pub fn chunk_exists(&self, chunk_indices: &[u64]) -> Result<bool, ArrayError> {
        self.validate_chunk_indices(chunk_indices)?;
        Ok(self.storage.exists(&self.chunk_key(chunk_indices))?)
    }

    /// Read and decode the chunk at `chunk_indices` into its little-endian element bytes.
    ///
    /// A chunk which has not been written is the fill value repeated for every element of the chunk.
    ///
    /// # Errors
    /// Returns an [`ArrayError`] if:
    ///  - `chunk_indices` are invalid,
    ///  - there is a codec decoding error (including a checksum mismatch),
    ///  - the decoded size does not match the chunk shape, or
    ///  - there is an underlying store error.
    pub fn retrieve_chunk_bytes(&self, chunk_indices: &[u64]) -> Result<Vec<u8>, ArrayError> {
        let (num_elements, decoded_size) = self.chunk_decoded_size(chunk_indices)?;
        let chunk_encoded = retrieve_chunk(
            &*self.storage,
            self.path(),
            chunk_indices,
            self.chunk_key_encoding(),
        )?;
        let Some(chunk_encoded) = chunk_encoded else {
            log::trace!("chunk {chunk_indices:?} of {} is missing, using the fill value", self.path());
            return Ok(self.fill_value().broadcast(num_elements));
        };

        let decoded_representation = BytesRepresentation::FixedSize(decoded_size as u64);
        let chunk_decoded = self
            .codecs()
            .decode(chunk_encoded.to_vec(), self.data_type(), &decoded_representation)
            .map_err(|err| match err {
                CodecError::UnexpectedChunkDecodedSize(actual, expected) => {
                    ArrayError::UnexpectedChunkDecodedSize(chunk_indices.to_vec(), actual, expected)
                }
                err => ArrayError::CodecError(err),
            })?;
        Ok(chunk_decoded)
    }

    /// Read and decode the chunk at `chunk_indices` into a vector of its elements.
    ///
    /// A chunk which has not been written is the fill value repeated for every element of the chunk.
    ///
    /// # Errors
    /// Returns an [`ArrayError`] if:
    ///  - `T` is not compatible with the data type of the array, or
    ///  - a [`retrieve_chunk_bytes`](Array::retrieve_chunk_bytes) error condition is met.
    pub fn read_chunk<T: Element>(&self, chunk_indices: &[u64]) -> Result<Vec<T>, ArrayError> {
        T::validate_data_type(self.data_type())?;
        let bytes = self.retrieve_chunk_bytes(chunk_indices)?;
        T::from_array_bytes(self.data_type(), &bytes)
    }
}
