//! Zarr chunk grids.
//!
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#chunk-grids>.
//!
//! A [`ChunkGrid`] is a [`Box`] wrapped chunk grid which implements [`ChunkGridTraits`].
//! Chunk grids are zarr extension points and they can be registered through [`inventory`] as a [`ChunkGridPlugin`].
//!
//! A [regular grid](RegularChunkGrid) can be created [from a `Vec<u64>` chunk shape](ChunkGrid#impl-From<Vec<u64>>-for-ChunkGrid).

mod regular;

pub use regular::{RegularChunkGrid, RegularChunkGridConfiguration};

use derive_more::{Deref, From};
use thiserror::Error;

use crate::{
    metadata::Metadata,
    plugin::{create_from_registry, Plugin, PluginCreateError},
};

use super::{ArrayIndices, ArrayShape};

/// A chunk grid.
#[derive(Debug, Clone, Deref, From)]
pub struct ChunkGrid(Box<dyn ChunkGridTraits>);

/// A chunk grid plugin.
pub type ChunkGridPlugin = Plugin<ChunkGrid>;
inventory::collect!(ChunkGridPlugin);

impl ChunkGrid {
    /// Create a chunk grid.
    pub fn new<T: ChunkGridTraits + 'static>(chunk_grid: T) -> Self {
        let chunk_grid: Box<dyn ChunkGridTraits> = Box::new(chunk_grid);
        chunk_grid.into()
    }

    /// Create a chunk grid from metadata.
    ///
    /// # Errors
    ///
    /// Returns a [`PluginCreateError`] if the metadata is invalid or not associated with a registered chunk grid plugin.
    pub fn from_metadata(metadata: &Metadata) -> Result<Self, PluginCreateError> {
        create_from_registry(inventory::iter::<ChunkGridPlugin>, metadata, "chunk grid")
    }
}

impl From<ArrayShape> for ChunkGrid {
    /// Create a regular chunk grid from a chunk shape.
    fn from(regular_chunk_shape: ArrayShape) -> Self {
        Self::new(RegularChunkGrid::new(regular_chunk_shape))
    }
}

/// An invalid chunk grid indices error.
#[derive(Clone, Debug, Error)]
#[error("invalid chunk grid indices {_0:?} for a grid of shape {_1:?}")]
pub struct InvalidChunkGridIndicesError(pub ArrayIndices, pub ArrayShape);

/// Chunk grid traits.
pub trait ChunkGridTraits: dyn_clone::DynClone + core::fmt::Debug + Send + Sync {
    /// Create metadata.
    fn create_metadata(&self) -> Metadata;

    /// The dimensionality of the grid.
    fn dimensionality(&self) -> usize;

    /// The grid shape (i.e. number of chunks along each dimension), or [`None`] if the dimensionality of `array_shape` does not match.
    fn grid_shape(&self, array_shape: &[u64]) -> Option<ArrayShape>;

    /// The shape of every element of the chunk at `chunk_indices`.
    fn chunk_shape(&self, chunk_indices: &[u64]) -> ArrayShape;

    /// Check that `chunk_indices` address a chunk of an array with shape `array_shape`.
    ///
    /// # Errors
    /// Returns [`InvalidChunkGridIndicesError`] if the dimensionality of `chunk_indices` does not match the grid,
    /// or an index is outside of the grid shape.
    fn validate_chunk_indices(
        &self,
        chunk_indices: &[u64],
        array_shape: &[u64],
    ) -> Result<(), InvalidChunkGridIndicesError> {
        let err = || InvalidChunkGridIndicesError(chunk_indices.to_vec(), array_shape.to_vec());
        let grid_shape = self.grid_shape(array_shape).ok_or_else(err)?;
        if chunk_indices.len() == grid_shape.len()
            && std::iter::zip(chunk_indices, &grid_shape).all(|(index, count)| index < count)
        {
            Ok(())
        } else {
            Err(err())
        }
    }
}

dyn_clone::clone_trait_object!(ChunkGridTraits);
