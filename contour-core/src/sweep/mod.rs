//! Merge-tree construction by sweeping the field over the mesh.
//!
//! A descending sweep tracks how superlevel-set components appear and merge
//! and yields the join tree. An ascending sweep does the same for sublevel
//! sets and yields the split tree. Each component remembers its boundary
//! vertex, the last vertex swept into it, and every newly swept vertex hangs
//! below the boundary of each component it touches.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::{
    error::{ContourTreeError, Result, TreeError},
    field::ScalarField,
    mesh::MeshAdjacency,
    tree::{DynamicTree, TreeKind},
    union_find::DisjointSet,
    vertex::VertexId,
};

/// Order in which a sweep visits vertices.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SweepDirection {
    /// Highest value first; builds the join tree.
    Descending,
    /// Lowest value first; builds the split tree.
    Ascending,
}

impl SweepDirection {
    /// Returns the kind of merge tree this sweep produces.
    #[must_use]
    pub const fn tree_kind(self) -> TreeKind {
        match self {
            Self::Descending => TreeKind::Join,
            Self::Ascending => TreeKind::Split,
        }
    }

    /// Returns a lowercase label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Descending => "descending",
            Self::Ascending => "ascending",
        }
    }
}

/// Merge tree produced by a sweep, with bookkeeping counters.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeTreeSweep {
    tree: DynamicTree,
    direction: SweepDirection,
    union_events: usize,
    extrema: usize,
}

impl MergeTreeSweep {
    /// Returns the merge tree.
    #[must_use]
    pub const fn tree(&self) -> &DynamicTree {
        &self.tree
    }

    /// Consumes the sweep and returns the merge tree.
    #[must_use]
    pub fn into_tree(self) -> DynamicTree {
        self.tree
    }

    /// Returns the direction the sweep ran in.
    #[must_use]
    pub const fn direction(&self) -> SweepDirection {
        self.direction
    }

    /// Returns the number of component merges, which equals the number of
    /// tree edges.
    #[must_use]
    pub const fn union_events(&self) -> usize {
        self.union_events
    }

    /// Returns how many vertices started a new component.
    #[must_use]
    pub const fn extrema(&self) -> usize {
        self.extrema
    }
}

/// Sweeps `field` over `mesh` and returns the resulting merge tree.
///
/// # Errors
/// Returns [`ContourTreeError::FieldLengthMismatch`] when the field and mesh
/// disagree on the vertex count, [`ContourTreeError::EmptyMesh`] when there
/// are no vertices, and [`ContourTreeError::InvalidVertex`] when the mesh
/// lists an out-of-range neighbour.
///
/// # Examples
/// ```
/// use contour_core::{AdjacencyList, ScalarField, SweepDirection, VertexId, sweep};
///
/// let mesh = AdjacencyList::from_edges(3, &[(0, 1), (1, 2)])?;
/// let field = ScalarField::new(vec![0.0, 1.0, 2.0])?;
/// let join = sweep(&mesh, &field, SweepDirection::Descending)?;
/// assert_eq!(
///     join.tree().edges(),
///     vec![
///         (VertexId::new(1), VertexId::new(0)),
///         (VertexId::new(2), VertexId::new(1)),
///     ],
/// );
/// # Ok::<(), contour_core::ContourTreeError>(())
/// ```
#[instrument(
    name = "core.sweep",
    err,
    skip(mesh, field),
    fields(
        mesh = %mesh.name(),
        vertices = field.len(),
        direction = direction.as_str(),
    ),
)]
pub fn sweep<M: MeshAdjacency + ?Sized>(
    mesh: &M,
    field: &ScalarField,
    direction: SweepDirection,
) -> Result<MergeTreeSweep> {
    let vertex_count = mesh.vertex_count();
    if vertex_count != field.len() {
        return Err(ContourTreeError::FieldLengthMismatch {
            vertices: vertex_count,
            values: field.len(),
        });
    }
    if vertex_count == 0 {
        return Err(ContourTreeError::EmptyMesh);
    }

    let mut sets = DisjointSet::with_capacity(vertex_count);
    let mut tree = DynamicTree::with_capacity(direction.tree_kind(), vertex_count);
    let mut union_events = 0_usize;
    let mut extrema = 0_usize;

    for vertex in field.sweep_order(direction) {
        sets.make_set(vertex);
        let components = touched_components(mesh, &mut sets, vertex, vertex_count)?;
        let value = field
            .value(vertex)
            .ok_or(TreeError::UnknownVertex { vertex })?;
        tree.add_node(vertex, value);

        if components.is_empty() {
            extrema += 1;
            continue;
        }

        for component in components {
            let boundary = sets
                .boundary(component)
                .ok_or(TreeError::InvariantViolation {
                    invariant: "component has no boundary vertex",
                    vertex: component,
                })?;
            tree.connect_nodes(boundary, vertex)?;
            sets.union(component, vertex)
                .ok_or(TreeError::InvariantViolation {
                    invariant: "swept vertex must be registered before merging",
                    vertex,
                })?;
            union_events += 1;
        }

        let merged = sets.find(vertex).ok_or(TreeError::InvariantViolation {
            invariant: "swept vertex must be registered before merging",
            vertex,
        })?;
        sets.set_boundary(merged, vertex);
    }

    debug!(
        kind = direction.tree_kind().as_str(),
        nodes = tree.len(),
        union_events,
        extrema,
        "merge tree built"
    );
    Ok(MergeTreeSweep {
        tree,
        direction,
        union_events,
        extrema,
    })
}

/// Collects the distinct components already swept among `vertex`'s
/// neighbours, ordered by representative.
fn touched_components<M: MeshAdjacency + ?Sized>(
    mesh: &M,
    sets: &mut DisjointSet,
    vertex: VertexId,
    vertex_count: usize,
) -> Result<BTreeSet<VertexId>> {
    let mut components = BTreeSet::new();
    for &neighbor in mesh.neighbors(vertex) {
        if neighbor == vertex {
            continue;
        }
        if neighbor.index() >= vertex_count {
            return Err(ContourTreeError::InvalidVertex {
                vertex: neighbor.index(),
                vertex_count,
            });
        }
        if let Some(component) = sets.find(neighbor) {
            components.insert(component);
        }
    }
    Ok(components)
}
