//! Type definitions for contour-tree property-based tests.

use test_strategy::Arbitrary;

use crate::{field::ScalarField, mesh::AdjacencyList};

/// Shape of the generated mesh.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum MeshTopology {
    /// Vertices joined in a single chain.
    #[weight(2)]
    Path,
    /// Every vertex attached to a random earlier vertex.
    #[weight(2)]
    RandomTree,
    /// Rectangular grid with every cell split into two triangles.
    #[weight(3)]
    TriangulatedGrid,
}

/// Mesh and field generated for one property case.
#[derive(Clone, Debug)]
pub(super) struct MeshFixture {
    /// Shape the mesh was generated from.
    pub topology: MeshTopology,
    /// Symmetric adjacency of the mesh.
    pub mesh: AdjacencyList,
    /// Distinct scalar values, one per vertex.
    pub field: ScalarField,
}

/// One union-find operation applied by the law checks.
#[derive(Clone, Copy, Debug)]
pub(super) enum SetOperation {
    /// Merge the components of both labels.
    Union(usize, usize),
    /// Look up the representative of a label.
    Find(usize),
}
