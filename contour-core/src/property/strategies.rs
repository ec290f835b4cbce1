//! Strategy builders for contour-tree property-based tests.
//!
//! Every generated mesh is simply connected so its contour tree is a single
//! tree. Scalar values are a shuffled permutation, scaled and offset, so no
//! two vertices share a value.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{
    field::ScalarField,
    mesh::{AdjacencyList, MeshAdjacency},
};

use super::types::{MeshFixture, MeshTopology, SetOperation};

/// Minimum vertex count for paths and trees.
const MIN_VERTICES: usize = 1;
/// Maximum vertex count for paths and trees.
const MAX_VERTICES: usize = 48;
/// Maximum grid side length.
const MAX_GRID_SIDE: usize = 7;
/// Number of labels exercised by the union-find law checks.
const SET_LABELS: usize = 16;

/// Generates mesh fixtures across every topology.
pub(super) fn mesh_fixture_strategy() -> impl Strategy<Value = MeshFixture> {
    (any::<MeshTopology>(), any::<u64>()).prop_map(|(topology, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(topology, &mut rng)
    })
}

/// Generates a fixture for a specific topology.
///
/// Useful for rstest cases that pin the topology and seed.
pub(super) fn generate_fixture(topology: MeshTopology, rng: &mut SmallRng) -> MeshFixture {
    let mesh = match topology {
        MeshTopology::Path => generate_path(rng),
        MeshTopology::RandomTree => generate_tree(rng),
        MeshTopology::TriangulatedGrid => generate_grid(rng),
    };
    let field = distinct_field(mesh.vertex_count(), rng);
    MeshFixture {
        topology,
        mesh,
        field,
    }
}

/// Generates sequences of union and find operations over a fixed label set.
pub(super) fn set_operations_strategy() -> impl Strategy<Value = Vec<SetOperation>> {
    let operation = prop_oneof![
        3 => (0..SET_LABELS, 0..SET_LABELS).prop_map(|(a, b)| SetOperation::Union(a, b)),
        1 => (0..SET_LABELS).prop_map(SetOperation::Find),
    ];
    prop::collection::vec(operation, 0..64)
}

/// Number of labels registered by the union-find law checks.
pub(super) const fn set_label_count() -> usize {
    SET_LABELS
}

fn generate_path(rng: &mut SmallRng) -> AdjacencyList {
    let vertex_count = rng.gen_range(MIN_VERTICES..=MAX_VERTICES);
    let edges: Vec<(usize, usize)> = (1..vertex_count).map(|i| (i - 1, i)).collect();
    AdjacencyList::from_edges(vertex_count, &edges).expect("path edges are in range")
}

fn generate_tree(rng: &mut SmallRng) -> AdjacencyList {
    let vertex_count = rng.gen_range(MIN_VERTICES..=MAX_VERTICES);
    let edges: Vec<(usize, usize)> = (1..vertex_count)
        .map(|i| (rng.gen_range(0..i), i))
        .collect();
    AdjacencyList::from_edges(vertex_count, &edges).expect("tree edges are in range")
}

fn generate_grid(rng: &mut SmallRng) -> AdjacencyList {
    let width = rng.gen_range(2..=MAX_GRID_SIDE);
    let height = rng.gen_range(2..=MAX_GRID_SIDE);
    let index = |x: usize, y: usize| y * width + x;
    let mut triangles = Vec::with_capacity(2 * (width - 1) * (height - 1));
    for y in 1..height {
        for x in 1..width {
            let (a, b) = (index(x - 1, y - 1), index(x, y - 1));
            let (c, d) = (index(x - 1, y), index(x, y));
            // Random diagonal per cell.
            if rng.gen_bool(0.5) {
                triangles.push([a, b, d]);
                triangles.push([a, d, c]);
            } else {
                triangles.push([a, b, c]);
                triangles.push([b, d, c]);
            }
        }
    }
    AdjacencyList::from_triangles(width * height, &triangles).expect("grid faces are in range")
}

fn distinct_field(vertex_count: usize, rng: &mut SmallRng) -> ScalarField {
    let mut ranks: Vec<usize> = (0..vertex_count).collect();
    shuffle(&mut ranks, rng);
    let scale: f64 = rng.gen_range(0.25..4.0);
    let offset: f64 = rng.gen_range(-100.0..100.0);
    let values = ranks
        .into_iter()
        .map(|rank| offset + scale * rank as f64)
        .collect();
    ScalarField::new(values).expect("generated values are finite")
}

/// Fisher-Yates shuffle using the provided RNG.
fn shuffle(slice: &mut [usize], rng: &mut SmallRng) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}
