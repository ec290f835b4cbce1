//! Mesh adjacency providers consumed by the sweep.

use crate::{
    error::{ContourTreeError, Result},
    vertex::VertexId,
};

/// Symmetric vertex adjacency of a mesh.
///
/// If `b` is a neighbour of `a` then `a` must be a neighbour of `b`. The sweep
/// ignores a vertex listed as its own neighbour.
///
/// # Examples
/// ```
/// use contour_core::{MeshAdjacency, VertexId};
///
/// struct Path(Vec<Vec<VertexId>>);
///
/// impl MeshAdjacency for Path {
///     fn vertex_count(&self) -> usize { self.0.len() }
///     fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
///         self.0.get(vertex.index()).map(Vec::as_slice).unwrap_or(&[])
///     }
/// }
///
/// let path = Path(vec![vec![VertexId::new(1)], vec![VertexId::new(0)]]);
/// assert_eq!(path.vertex_count(), 2);
/// assert_eq!(path.neighbors(VertexId::new(0)), &[VertexId::new(1)]);
/// assert_eq!(path.name(), "mesh");
/// ```
pub trait MeshAdjacency {
    /// Returns the number of vertices in the mesh.
    fn vertex_count(&self) -> usize;

    /// Returns the vertices adjacent to `vertex`.
    fn neighbors(&self, vertex: VertexId) -> &[VertexId];

    /// Returns a human-readable name used in diagnostics.
    fn name(&self) -> &str {
        "mesh"
    }
}

/// Owned adjacency lists with sorted, deduplicated, symmetric neighbours.
///
/// # Examples
/// ```
/// use contour_core::{AdjacencyList, MeshAdjacency, VertexId};
///
/// let mesh = AdjacencyList::from_triangles(4, &[[0, 1, 2], [1, 2, 3]])?;
/// assert_eq!(
///     mesh.neighbors(VertexId::new(1)),
///     &[VertexId::new(0), VertexId::new(2), VertexId::new(3)],
/// );
/// assert_eq!(mesh.edge_count(), 5);
/// # Ok::<(), contour_core::ContourTreeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyList {
    name: String,
    neighbors: Vec<Vec<VertexId>>,
}

impl AdjacencyList {
    /// Creates `vertex_count` isolated vertices.
    #[must_use]
    pub fn new(vertex_count: usize) -> Self {
        Self {
            name: "adjacency".to_owned(),
            neighbors: vec![Vec::new(); vertex_count],
        }
    }

    /// Builds adjacency from undirected `(a, b)` edges.
    ///
    /// # Errors
    /// Returns [`ContourTreeError::InvalidVertex`] when an endpoint is out of
    /// range.
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize)]) -> Result<Self> {
        Self::from_parts(vertex_count, edges, &[])
    }

    /// Builds adjacency from triangle faces, connecting each pair of corners.
    ///
    /// # Errors
    /// Returns [`ContourTreeError::InvalidVertex`] when a corner is out of
    /// range.
    pub fn from_triangles(vertex_count: usize, triangles: &[[usize; 3]]) -> Result<Self> {
        Self::from_parts(vertex_count, &[], triangles)
    }

    /// Builds adjacency from a mix of explicit edges and triangle faces.
    ///
    /// # Errors
    /// Returns [`ContourTreeError::InvalidVertex`] when an index is out of
    /// range.
    pub fn from_parts(
        vertex_count: usize,
        edges: &[(usize, usize)],
        triangles: &[[usize; 3]],
    ) -> Result<Self> {
        let mut mesh = Self::new(vertex_count);
        for &(a, b) in edges {
            mesh.add_edge(a, b)?;
        }
        for &[a, b, c] in triangles {
            mesh.add_edge(a, b)?;
            mesh.add_edge(b, c)?;
            mesh.add_edge(c, a)?;
        }
        mesh.normalise();
        Ok(mesh)
    }

    /// Overrides the diagnostic name reported through [`MeshAdjacency::name`].
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    fn add_edge(&mut self, a: usize, b: usize) -> Result<()> {
        let vertex_count = self.neighbors.len();
        for vertex in [a, b] {
            if vertex >= vertex_count {
                return Err(ContourTreeError::InvalidVertex {
                    vertex,
                    vertex_count,
                });
            }
        }
        if a == b {
            return Ok(());
        }
        if let Some(list) = self.neighbors.get_mut(a) {
            list.push(VertexId::new(b));
        }
        if let Some(list) = self.neighbors.get_mut(b) {
            list.push(VertexId::new(a));
        }
        Ok(())
    }

    fn normalise(&mut self) {
        for list in &mut self.neighbors {
            list.sort_unstable();
            list.dedup();
        }
    }
}

impl MeshAdjacency for AdjacencyList {
    fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        self.neighbors.get(vertex.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(indices: &[usize]) -> Vec<VertexId> {
        indices.iter().copied().map(VertexId::new).collect()
    }

    #[test]
    fn from_edges_is_symmetric_and_deduplicated() {
        let mesh = AdjacencyList::from_edges(3, &[(0, 1), (1, 0), (1, 2), (2, 2)])
            .expect("edges are in range");
        assert_eq!(mesh.neighbors(VertexId::new(0)), ids(&[1]).as_slice());
        assert_eq!(mesh.neighbors(VertexId::new(1)), ids(&[0, 2]).as_slice());
        assert_eq!(mesh.neighbors(VertexId::new(2)), ids(&[1]).as_slice());
        assert_eq!(mesh.edge_count(), 2);
    }

    #[test]
    fn from_edges_rejects_out_of_range_endpoints() {
        let err = AdjacencyList::from_edges(2, &[(0, 2)]).expect_err("vertex 2 is out of range");
        assert_eq!(
            err,
            ContourTreeError::InvalidVertex {
                vertex: 2,
                vertex_count: 2
            }
        );
    }

    #[test]
    fn from_triangles_shares_edges_between_faces() {
        let mesh =
            AdjacencyList::from_triangles(4, &[[0, 1, 2], [2, 1, 3]]).expect("faces are in range");
        assert_eq!(mesh.edge_count(), 5);
        assert_eq!(mesh.neighbors(VertexId::new(3)), ids(&[1, 2]).as_slice());
    }

    #[test]
    fn neighbors_of_unknown_vertex_are_empty() {
        let mesh = AdjacencyList::new(1);
        assert!(mesh.neighbors(VertexId::new(7)).is_empty());
    }

    #[test]
    fn from_parts_combines_edges_and_faces() {
        let mesh = AdjacencyList::from_parts(4, &[(0, 3)], &[[0, 1, 2]]).expect("valid parts");
        assert_eq!(mesh.edge_count(), 4);
        assert_eq!(mesh.neighbors(VertexId::new(0)), ids(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn with_name_overrides_diagnostic_name() {
        let mesh = AdjacencyList::new(0).with_name("terrain");
        assert_eq!(mesh.name(), "terrain");
    }
}
