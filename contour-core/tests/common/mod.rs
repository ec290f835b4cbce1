use contour_core::{AdjacencyList, MeshAdjacency, ScalarField, VertexId};

/// Adjacency backed by raw neighbour lists, without any normalisation.
pub struct RawMesh {
    neighbors: Vec<Vec<VertexId>>,
}

impl RawMesh {
    #[must_use]
    pub fn new(neighbors: Vec<Vec<usize>>) -> Self {
        Self {
            neighbors: neighbors
                .into_iter()
                .map(|list| list.into_iter().map(VertexId::new).collect())
                .collect(),
        }
    }
}

impl MeshAdjacency for RawMesh {
    fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        self.neighbors
            .get(vertex.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn name(&self) -> &str {
        "raw"
    }
}

#[must_use]
pub fn path(vertex_count: usize) -> AdjacencyList {
    let edges: Vec<(usize, usize)> = (1..vertex_count).map(|i| (i - 1, i)).collect();
    AdjacencyList::from_edges(vertex_count, &edges)
        .expect("path edges are in range")
        .with_name("path")
}

#[must_use]
pub fn field(values: &[f64]) -> ScalarField {
    ScalarField::new(values.to_vec()).expect("test values are finite")
}

#[must_use]
pub fn v(index: usize) -> VertexId {
    VertexId::new(index)
}
