//! Shared test utilities for `contour-core`.

use contour_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{mesh::AdjacencyList, field::ScalarField, vertex::VertexId};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROPTEST_CASES` and
/// `CONTOUR_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Shorthand for a vertex handle.
pub(crate) const fn v(index: usize) -> VertexId {
    VertexId::new(index)
}

/// Builds a finite field from literal values.
pub(crate) fn field(values: &[f64]) -> ScalarField {
    ScalarField::new(values.to_vec()).expect("test fields are finite")
}

/// Builds the path `0 - 1 - ... - (n - 1)`.
pub(crate) fn path_mesh(vertex_count: usize) -> AdjacencyList {
    let edges: Vec<(usize, usize)> = (1..vertex_count).map(|i| (i - 1, i)).collect();
    AdjacencyList::from_edges(vertex_count, &edges)
        .expect("path edges are in range")
        .with_name("path")
}

/// Builds a `width x height` grid with every cell split into two triangles.
///
/// Vertex `(x, y)` has index `y * width + x`.
pub(crate) fn grid_mesh(width: usize, height: usize) -> AdjacencyList {
    let index = |x: usize, y: usize| y * width + x;
    let mut triangles = Vec::new();
    for y in 1..height {
        for x in 1..width {
            let (a, b) = (index(x - 1, y - 1), index(x, y - 1));
            let (c, d) = (index(x - 1, y), index(x, y));
            triangles.push([a, b, d]);
            triangles.push([a, d, c]);
        }
    }
    AdjacencyList::from_triangles(width * height, &triangles)
        .expect("grid faces are in range")
        .with_name("grid")
}
