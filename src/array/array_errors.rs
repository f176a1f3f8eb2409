use thiserror::Error;

use crate::{
    node::{NodePath, NodePathError},
    plugin::PluginCreateError,
    storage::StorageError,
};

use super::{
    chunk_grid::InvalidChunkGridIndicesError,
    codec::CodecError,
    data_type::{IncompatibleFillValueMetadataError, UnsupportedDataTypeError},
    ArrayIndices, DataType,
};

/// An array creation error.
#[derive(Debug, Error)]
pub enum ArrayCreateError {
    /// Invalid zarr format.
    #[error("expected zarr_format 3, got {_0}")]
    InvalidZarrFormat(usize),
    /// Invalid node type.
    #[error("expected node_type array, got {_0}")]
    InvalidNodeType(String),
    /// An invalid node path
    #[error(transparent)]
    NodePathError(#[from] NodePathError),
    /// Unsupported data type.
    #[error(transparent)]
    DataTypeCreateError(#[from] UnsupportedDataTypeError),
    /// Invalid fill value.
    #[error(transparent)]
    InvalidFillValue(#[from] IncompatibleFillValueMetadataError),
    /// Error creating codecs.
    #[error(transparent)]
    CodecsCreateError(PluginCreateError),
    /// Error creating chunk grid.
    #[error(transparent)]
    ChunkGridCreateError(PluginCreateError),
    /// Error creating chunk key encoding.
    #[error(transparent)]
    ChunkKeyEncodingCreateError(PluginCreateError),
    /// The dimensionality of the chunk grid does not match the array shape.
    #[error("chunk grid dimensionality {_0} does not match array dimensionality {_1}")]
    InvalidChunkGridDimensionality(usize, usize),
    /// The number of dimension names does not match the array dimensionality.
    #[error("the number of dimension names {_0} does not match array dimensionality {_1}")]
    InvalidDimensionNames(usize, usize),
    /// Storage error.
    #[error(transparent)]
    StorageError(#[from] StorageError),
    /// Missing metadata.
    #[error("array metadata is missing at {_0}")]
    MissingMetadata(NodePath),
    /// The metadata document could not be parsed.
    #[error("array metadata is invalid: {_0}")]
    MetadataDeserializationError(#[from] serde_json::Error),
}

/// Array errors.
#[derive(Debug, Error)]
pub enum ArrayError {
    /// A store error.
    #[error(transparent)]
    StorageError(#[from] StorageError),
    /// A codec error.
    #[error(transparent)]
    CodecError(#[from] CodecError),
    /// Invalid chunk grid indices.
    #[error(transparent)]
    InvalidChunkGridIndicesError(#[from] InvalidChunkGridIndicesError),
    /// Unexpected data length.
    #[error("got chunk data of length {_0}, expected {_1}")]
    InvalidDataLength(usize, usize),
    /// Incompatible element type.
    #[error("the element type {_1} is incompatible with {_0}")]
    IncompatibleElementType(DataType, &'static str),
    /// An element value is not valid for the data type.
    #[error("invalid element value {_1} for data type {_0}")]
    InvalidElementValue(DataType, String),
    /// The decoded size of a chunk did not match what was expected.
    #[error("the decoded chunk at {_0:?} has size {_1}, expected {_2}")]
    UnexpectedChunkDecodedSize(ArrayIndices, usize, u64),
}
