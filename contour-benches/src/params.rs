//! Benchmark parameter types.

use std::fmt;

/// Grid dimensions for a terrain benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GridBenchParams {
    /// Vertices along the x axis.
    pub width: usize,
    /// Vertices along the z axis.
    pub depth: usize,
}

impl GridBenchParams {
    /// Number of vertices in the grid.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.width.saturating_mul(self.depth)
    }
}

impl fmt::Display for GridBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.depth)
    }
}

/// Grid dimensions plus the simplification flag for a pipeline run.
#[derive(Clone, Copy, Debug)]
pub struct PipelineBenchParams {
    /// Terrain grid.
    pub grid: GridBenchParams,
    /// Whether the contour tree is simplified.
    pub simplify: bool,
}

impl fmt::Display for PipelineBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.simplify { "simplified" } else { "full" };
        write!(f, "{},{mode}", self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_compact() {
        let grid = GridBenchParams { width: 32, depth: 16 };
        assert_eq!(grid.to_string(), "32x16");
        assert_eq!(grid.vertex_count(), 512);
        let run = PipelineBenchParams { grid, simplify: true };
        assert_eq!(run.to_string(), "32x16,simplified");
    }
}
