//! Synthetic terrain generation.
//!
//! Builds a triangulated `width x depth` grid and a height field made from a
//! handful of random sinusoidal ridges plus small jitter, so the pipeline sees
//! many local extrema and saddles.

use contour_core::{AdjacencyList, ContourTreeError, ScalarField};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;

/// Number of sinusoidal ridges summed into each terrain.
const RIDGE_COUNT: usize = 4;

/// Errors raised while generating a terrain.
#[derive(Debug, Error)]
pub enum TerrainError {
    /// A grid side was smaller than two vertices.
    #[error("terrain {axis} must be at least 2, got {got}")]
    TooSmall {
        /// Name of the offending axis.
        axis: &'static str,
        /// Requested size.
        got: usize,
    },
    /// `width * depth` does not fit in `usize`.
    #[error("terrain of {width}x{depth} vertices overflows usize")]
    Overflow {
        /// Requested width.
        width: usize,
        /// Requested depth.
        depth: usize,
    },
    /// The generated mesh or field was rejected.
    #[error(transparent)]
    Core(#[from] ContourTreeError),
}

/// Configuration for [`SyntheticTerrain::generate`].
#[derive(Clone, Copy, Debug)]
pub struct TerrainConfig {
    /// Vertices along the x axis.
    pub width: usize,
    /// Vertices along the z axis.
    pub depth: usize,
    /// RNG seed.
    pub seed: u64,
}

/// Triangulated grid mesh with a height field.
#[derive(Clone, Debug)]
pub struct SyntheticTerrain {
    mesh: AdjacencyList,
    field: ScalarField,
}

#[derive(Clone, Copy)]
struct Ridge {
    amplitude: f64,
    frequency_x: f64,
    frequency_z: f64,
    phase: f64,
}

impl SyntheticTerrain {
    /// Generates a terrain from `config`.
    ///
    /// # Errors
    /// Returns [`TerrainError::TooSmall`] when a side is below two vertices,
    /// [`TerrainError::Overflow`] when the vertex count overflows, and
    /// [`TerrainError::Core`] if the generated mesh or field is rejected.
    ///
    /// # Examples
    /// ```
    /// use contour_benches::terrain::{SyntheticTerrain, TerrainConfig};
    /// use contour_core::MeshAdjacency;
    ///
    /// let terrain = SyntheticTerrain::generate(&TerrainConfig { width: 4, depth: 3, seed: 7 })?;
    /// assert_eq!(terrain.mesh().vertex_count(), 12);
    /// # Ok::<(), contour_benches::terrain::TerrainError>(())
    /// ```
    pub fn generate(config: &TerrainConfig) -> Result<Self, TerrainError> {
        let TerrainConfig { width, depth, seed } = *config;
        if width < 2 {
            return Err(TerrainError::TooSmall {
                axis: "width",
                got: width,
            });
        }
        if depth < 2 {
            return Err(TerrainError::TooSmall {
                axis: "depth",
                got: depth,
            });
        }
        let vertex_count = width
            .checked_mul(depth)
            .ok_or(TerrainError::Overflow { width, depth })?;

        let mut rng = SmallRng::seed_from_u64(seed);
        let ridges: Vec<Ridge> = (0..RIDGE_COUNT).map(|_| random_ridge(&mut rng)).collect();

        let mut triangles = Vec::with_capacity((width - 1) * (depth - 1) * 2);
        for z in 0..depth - 1 {
            for x in 0..width - 1 {
                let a = z * width + x;
                let b = a + 1;
                let c = a + width;
                let d = c + 1;
                triangles.push([a, b, d]);
                triangles.push([a, d, c]);
            }
        }
        let mesh = AdjacencyList::from_triangles(vertex_count, &triangles)?
            .with_name(format!("terrain-{width}x{depth}"));

        let mut values = Vec::with_capacity(vertex_count);
        for z in 0..depth {
            for x in 0..width {
                values.push(height_at(&ridges, x, z, &mut rng));
            }
        }
        let field = ScalarField::new(values)?;

        Ok(Self { mesh, field })
    }

    /// Returns the grid adjacency.
    #[must_use]
    pub const fn mesh(&self) -> &AdjacencyList {
        &self.mesh
    }

    /// Returns the height field.
    #[must_use]
    pub const fn field(&self) -> &ScalarField {
        &self.field
    }
}

fn random_ridge(rng: &mut SmallRng) -> Ridge {
    Ridge {
        amplitude: rng.gen_range(0.5..2.0),
        frequency_x: rng.gen_range(0.05..0.6),
        frequency_z: rng.gen_range(0.05..0.6),
        phase: rng.gen_range(0.0..std::f64::consts::TAU),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "grid coordinates are far below 2^52"
)]
#[expect(
    clippy::float_arithmetic,
    reason = "heights are sums of sinusoids"
)]
fn height_at(ridges: &[Ridge], x: usize, z: usize, rng: &mut SmallRng) -> f64 {
    let (x, z) = (x as f64, z as f64);
    let surface: f64 = ridges
        .iter()
        .map(|ridge| {
            ridge.amplitude
                * (ridge.frequency_x * x + ridge.phase).sin()
                * (ridge.frequency_z * z - ridge.phase).cos()
        })
        .sum();
    surface + rng.gen_range(-0.05..0.05)
}
