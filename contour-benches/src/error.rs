//! Benchmark setup error type.
//!
//! Lets setup code propagate failures with `?` instead of `.expect()`.

use contour_core::ContourTreeError;

use crate::terrain::TerrainError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic terrain generation failed.
    #[error("terrain generation failed: {0}")]
    Terrain(#[from] TerrainError),
    /// A pipeline stage failed while preparing stage inputs.
    #[error("pipeline stage failed: {0}")]
    Core(#[from] ContourTreeError),
}
