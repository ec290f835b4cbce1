//! Contour-tree pipeline orchestration.
//!
//! Runs the join and split sweeps, condenses both merge trees over their
//! shared significant vertices, merges them by leaf pruning, and optionally
//! simplifies the result.

use std::io;

use tracing::{info, instrument, warn};

use crate::{
    error::{ContourTreeError, Result},
    field::ScalarField,
    mesh::MeshAdjacency,
    prune::merge_significant_trees,
    reduce::SignificantTrees,
    sweep::{SweepDirection, sweep},
    tree::DynamicTree,
    vertex::VertexId,
};

/// Entry point for computing contour trees.
///
/// # Examples
/// ```
/// use contour_core::{AdjacencyList, ContourTreeBuilder, ScalarField, VertexId};
///
/// let mesh = AdjacencyList::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)])?;
/// let field = ScalarField::new(vec![0.0, 3.0, 1.0, 4.0, 2.0])?;
/// let contour = ContourTreeBuilder::new().build().run(&mesh, &field)?;
///
/// let v = VertexId::new;
/// assert_eq!(contour.edges(), vec![(v(1), v(0)), (v(1), v(2)), (v(3), v(2)), (v(3), v(4))]);
/// # Ok::<(), contour_core::ContourTreeError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ContourTreePipeline {
    simplify: bool,
}

impl ContourTreePipeline {
    pub(crate) const fn new(simplify: bool) -> Self {
        Self { simplify }
    }

    /// Returns whether the final contour tree is simplified.
    #[must_use]
    pub const fn simplify(&self) -> bool {
        self.simplify
    }

    /// Computes the contour tree of `field` over `mesh`.
    ///
    /// # Errors
    /// Returns [`ContourTreeError::EmptyMesh`] when the mesh has no vertices,
    /// [`ContourTreeError::FieldLengthMismatch`] when the field does not match
    /// the mesh, [`ContourTreeError::InvalidVertex`] for out-of-range
    /// adjacency, and [`ContourTreeError::Tree`] when a structural invariant
    /// fails during construction.
    #[instrument(
        name = "core.run",
        err,
        skip(self, mesh, field),
        fields(
            mesh = %mesh.name(),
            vertices = mesh.vertex_count(),
            simplify = self.simplify,
        ),
    )]
    pub fn run<M: MeshAdjacency + ?Sized>(
        &self,
        mesh: &M,
        field: &ScalarField,
    ) -> Result<ContourTree> {
        if mesh.vertex_count() == 0 {
            warn!(mesh = mesh.name(), "mesh is empty, returning error");
            return Err(ContourTreeError::EmptyMesh);
        }

        let (join, split) = self.significant_trees(mesh, field)?.into_parts();
        let (mut tree, prune_order) = merge_significant_trees(join, split)?.into_parts();
        if self.simplify {
            let significant = tree.compute_significant_nodes()?;
            tree = tree.condense(significant.significant(), significant.roots())?;
        }

        info!(
            nodes = tree.len(),
            edges = tree.edge_count(),
            "contour tree computed"
        );
        Ok(ContourTree { tree, prune_order })
    }

    /// Sweeps the join and split trees and condenses them over their shared
    /// significant vertices, stopping before the merge.
    ///
    /// # Errors
    /// Returns the same errors as [`Self::run`].
    pub fn significant_trees<M: MeshAdjacency + ?Sized>(
        &self,
        mesh: &M,
        field: &ScalarField,
    ) -> Result<SignificantTrees> {
        let join = sweep(mesh, field, SweepDirection::Descending)?;
        let split = sweep(mesh, field, SweepDirection::Ascending)?;
        Ok(SignificantTrees::from_merge_trees(join.tree(), split.tree())?)
    }
}

/// Computes the contour tree with the default configuration.
///
/// # Errors
/// Returns the same errors as [`ContourTreePipeline::run`].
pub fn compute_contour_tree<M: MeshAdjacency + ?Sized>(
    mesh: &M,
    field: &ScalarField,
) -> Result<ContourTree> {
    ContourTreePipeline::default().run(mesh, field)
}

/// Contour tree returned by [`ContourTreePipeline::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContourTree {
    tree: DynamicTree,
    prune_order: Vec<VertexId>,
}

impl ContourTree {
    /// Returns the underlying tree.
    #[must_use]
    pub const fn tree(&self) -> &DynamicTree {
        &self.tree
    }

    /// Consumes the result and returns the underlying tree.
    #[must_use]
    pub fn into_tree(self) -> DynamicTree {
        self.tree
    }

    /// Returns the order in which the merge took vertices off its leaf queue.
    #[must_use]
    pub fn prune_order(&self) -> &[VertexId] {
        &self.prune_order
    }

    /// Returns every edge as `(higher, lower)`, sorted.
    #[must_use]
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        self.tree.edges()
    }

    /// Returns the number of nodes in the tree.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.tree.len()
    }

    /// Returns the number of edges in the tree.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.tree.edge_count()
    }

    /// Renders the tree as DOT.
    #[must_use]
    pub fn to_dot(&self) -> String {
        self.tree.to_dot()
    }

    /// Writes the DOT rendering of the tree to `writer`.
    ///
    /// # Errors
    /// Returns any I/O error raised by `writer`.
    pub fn write_dot<W: io::Write>(&self, writer: W) -> io::Result<()> {
        self.tree.write_dot(writer)
    }
}
