use std::sync::Arc;

use crate::{
    metadata::ArrayMetadata,
    storage::{erase_chunk, store_chunk, StorageError, WritableStorageTraits},
};

use super::{Array, ArrayCreateError, ArrayError, Element};

impl<TStorage: ?Sized + WritableStorageTraits> Array<TStorage> {
    /// Create an array in `storage` at `path` with `metadata` and write the metadata to the store.
    ///
    /// An existing node at `path` is overwritten.
    ///
    /// # Errors
    /// Returns [`ArrayCreateError`] if the metadata is invalid or it cannot be written.
    pub fn create(
        storage: Arc<TStorage>,
        path: &str,
        metadata: ArrayMetadata,
    ) -> Result<Self, ArrayCreateError> {
        let array = Self::new_with_metadata(storage, path, metadata)?;
        array.store_metadata()?;
        log::debug!("created array {}", array.path());
        Ok(array)
    }

    /// Store metadata.
    ///
    /// # Errors
    /// Returns [`StorageError`] if there is an underlying store error.
    pub fn store_metadata(&self) -> Result<(), StorageError> {
        crate::storage::store_metadata(&*self.storage, self.path(), self.metadata())
    }

    /// Encode `chunk_bytes` and store at `chunk_indices`.
    ///
    /// `chunk_bytes` are the little-endian bytes of every element of the chunk.
    /// Nothing is written if validation or encoding fails.
    ///
    /// # Errors
    /// Returns an [`ArrayError`] if
    ///  - `chunk_indices` are invalid,
    ///  - the length of `chunk_bytes` is not equal to the expected length (the product of the number of elements in the chunk and the data type size in bytes),
    ///  - there is a codec encoding error, or
    ///  - an underlying store error.
    pub fn store_chunk_bytes(
        &self,
        chunk_indices: &[u64],
        chunk_bytes: Vec<u8>,
    ) -> Result<(), ArrayError> {
        let (_, decoded_size) = self.chunk_decoded_size(chunk_indices)?;
        if chunk_bytes.len() != decoded_size {
            return Err(ArrayError::InvalidDataLength(chunk_bytes.len(), decoded_size));
        }
        let chunk_encoded = self.codecs().encode(chunk_bytes, self.data_type())?;
        log::trace!(
            "storing chunk {chunk_indices:?} of {} ({} bytes encoded)",
            self.path(),
            chunk_encoded.len()
        );
        store_chunk(
            &*self.storage,
            self.path(),
            chunk_indices,
            self.chunk_key_encoding(),
            chunk_encoded.into(),
        )?;
        Ok(())
    }

    /// Encode `chunk_elements` and store at `chunk_indices`.
    ///
    /// # Errors
    /// Returns an [`ArrayError`] if
    ///  - `T` is not compatible with the data type of the array,
    ///  - the number of elements is not the number of elements in the chunk, or
    ///  - a [`store_chunk_bytes`](Array::store_chunk_bytes) error condition is met.
    pub fn write_chunk<T: Element>(
        &self,
        chunk_indices: &[u64],
        chunk_elements: &[T],
    ) -> Result<(), ArrayError> {
        let (num_elements, _) = self.chunk_decoded_size(chunk_indices)?;
        if chunk_elements.len() != num_elements {
            return Err(ArrayError::InvalidDataLength(chunk_elements.len(), num_elements));
        }
        let chunk_bytes = T::into_array_bytes(self.data_type(), chunk_elements)?;
        self.store_chunk_bytes(chunk_indices, chunk_bytes)
    }

    /// Erase the chunk at `chunk_indices`.
    ///
    /// Succeeds if the chunk does not exist. Subsequent reads of the chunk return the fill value.
    ///
    /// # Errors
    /// Returns an [`ArrayError`] if `chunk_indices` are invalid or there is an underlying store error.
    pub fn erase_chunk(&self, chunk_indices: &[u64]) -> Result<(), ArrayError> {
        self.validate_chunk_indices(chunk_indices)?;
        erase_chunk(
            &*self.storage,
            self.path(),
            chunk_indices,
            self.chunk_key_encoding(),
        )?;
        Ok(())
    }
}
