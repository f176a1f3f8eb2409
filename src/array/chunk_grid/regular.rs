//! The regular chunk grid.
//!
//! See <https://zarr-specs.readthedocs.io/en/latest/v3/core/v3.0.html#regular-grids>.

use crate::{
    array::{chunk_grid::ChunkGridPlugin, ArrayShape},
    metadata::{Metadata, MetadataConfiguration},
    plugin::PluginCreateError,
};

use serde::{Deserialize, Serialize};

use super::{ChunkGrid, ChunkGridTraits};

/// The identifier for the `regular` chunk grid.
pub const IDENTIFIER: &str = "regular";

// Register the chunk grid.
inventory::submit! {
    ChunkGridPlugin::new(IDENTIFIER, is_name_regular, create_chunk_grid_regular)
}

fn is_name_regular(name: &str) -> bool {
    name.eq(IDENTIFIER)
}

pub(crate) fn create_chunk_grid_regular(
    metadata: &Metadata,
) -> Result<ChunkGrid, PluginCreateError> {
    let configuration: RegularChunkGridConfiguration = metadata.to_configuration()?;
    if configuration.chunk_shape.contains(&0) {
        return Err(PluginCreateError::Other(format!(
            "regular chunk grid chunk shape {:?} has a zero length dimension",
            configuration.chunk_shape
        )));
    }
    Ok(ChunkGrid::new(RegularChunkGrid::new(configuration.chunk_shape)))
}

/// Configuration parameters for a `regular` chunk grid.
#[derive(Serialize, Deserialize, Clone, Eq, PartialEq, Debug)]
#[serde(deny_unknown_fields)]
pub struct RegularChunkGridConfiguration {
    /// The chunk shape.
    pub chunk_shape: ArrayShape,
}

/// A `regular` chunk grid.
///
/// Every chunk has the same shape. Chunks along the upper edge of the array may extend past it.
#[derive(Debug, Clone)]
pub struct RegularChunkGrid {
    chunk_shape: ArrayShape,
}

impl RegularChunkGrid {
    /// Create a new regular chunk grid with chunk shape `chunk_shape`.
    #[must_use]
    pub fn new(chunk_shape: ArrayShape) -> Self {
        Self { chunk_shape }
    }

    /// Return the chunk shape.
    #[must_use]
    pub fn chunk_shape(&self) -> &[u64] {
        &self.chunk_shape
    }
}

impl ChunkGridTraits for RegularChunkGrid {
    fn create_metadata(&self) -> Metadata {
        let mut configuration = MetadataConfiguration::new();
        configuration.insert(
            "chunk_shape".to_string(),
            serde_json::Value::Array(
                self.chunk_shape
                    .iter()
                    .map(|size| serde_json::Value::from(*size))
                    .collect(),
            ),
        );
        Metadata::new_with_configuration(IDENTIFIER, configuration)
    }

    fn dimensionality(&self) -> usize {
        self.chunk_shape.len()
    }

    fn grid_shape(&self, array_shape: &[u64]) -> Option<ArrayShape> {
        if array_shape.len() != self.dimensionality() {
            return None;
        }
        Some(
            std::iter::zip(array_shape, &self.chunk_shape)
                .map(|(a, s)| if *s == 0 { 0 } else { a.div_ceil(*s) })
                .collect(),
        )
    }

    fn chunk_shape(&self, _chunk_indices: &[u64]) -> ArrayShape {
        self.chunk_shape.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_grid_regular() {
        let array_shape: ArrayShape = vec![10, 20];
        let chunk_grid = RegularChunkGrid::new(vec![5, 3]);
        assert_eq!(chunk_grid.dimensionality(), 2);
        assert_eq!(chunk_grid.grid_shape(&array_shape), Some(vec![2, 7]));
        assert_eq!(chunk_grid.grid_shape(&[10]), None);
        assert_eq!(ChunkGridTraits::chunk_shape(&chunk_grid, &[1, 6]), vec![5, 3]);
    }

    #[test]
    fn chunk_grid_regular_validate_indices() {
        let chunk_grid = RegularChunkGrid::new(vec![5, 5]);
        assert!(chunk_grid.validate_chunk_indices(&[1, 3], &[10, 20]).is_ok());
        assert!(chunk_grid.validate_chunk_indices(&[2, 0], &[10, 20]).is_err());
        assert!(chunk_grid.validate_chunk_indices(&[0], &[10, 20]).is_err());
        assert!(chunk_grid.validate_chunk_indices(&[0, 0, 0], &[10, 20]).is_err());
        assert_eq!(
            chunk_grid
                .validate_chunk_indices(&[0, 4], &[10, 20])
                .unwrap_err()
                .to_string(),
            "invalid chunk grid indices [0, 4] for a grid of shape [10, 20]"
        );
    }

    #[test]
    fn chunk_grid_regular_metadata() {
        let json = r#"{"name":"regular","configuration":{"chunk_shape":[5,5]}}"#;
        let metadata = Metadata::try_from(json).unwrap();
        let chunk_grid = ChunkGrid::from_metadata(&metadata).unwrap();
        assert_eq!(chunk_grid.dimensionality(), 2);
        assert_eq!(serde_json::to_string(&chunk_grid.create_metadata()).unwrap(), json);
    }

    #[test]
    fn chunk_grid_regular_invalid() {
        let metadata =
            Metadata::try_from(r#"{"name":"regular","configuration":{"chunk_shape":[5,0]}}"#)
                .unwrap();
        assert!(ChunkGrid::from_metadata(&metadata).is_err());
        let metadata =
            Metadata::try_from(r#"{"name":"regular","configuration":{"shape":[5]}}"#).unwrap();
        assert!(ChunkGrid::from_metadata(&metadata).is_err());
        assert!(ChunkGrid::from_metadata(&Metadata::new("rectangular")).is_err());
    }
}
