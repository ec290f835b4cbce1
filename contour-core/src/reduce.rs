//! Reduction of the join and split trees to their shared significant vertices.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::{
    error::TreeError,
    tree::DynamicTree,
    vertex::VertexId,
};

/// Join and split trees condensed over the union of their significant
/// vertices.
///
/// Both trees hold exactly the same vertex set, which is the precondition for
/// merging them into a contour tree.
#[derive(Clone, Debug, PartialEq)]
pub struct SignificantTrees {
    join: DynamicTree,
    split: DynamicTree,
    significant: BTreeSet<VertexId>,
}

impl SignificantTrees {
    /// Classifies both merge trees and condenses each one over the union of
    /// their significant sets, starting from its own significant roots.
    ///
    /// # Errors
    /// Returns [`TreeError::InvariantViolation`] when either input has a
    /// non-root node with more than one child, and [`TreeError::UnknownVertex`]
    /// when the trees do not share a vertex set.
    #[instrument(
        name = "core.reduce",
        err,
        skip(join, split),
        fields(join_nodes = join.len(), split_nodes = split.len()),
    )]
    pub fn from_merge_trees(join: &DynamicTree, split: &DynamicTree) -> Result<Self, TreeError> {
        let join_nodes = join.compute_significant_nodes()?;
        let split_nodes = split.compute_significant_nodes()?;
        let significant = join_nodes.merged_with(&split_nodes);

        let join_tree = join.condense(&significant, join_nodes.roots())?;
        let split_tree = split.condense(&significant, split_nodes.roots())?;
        debug!(
            significant = significant.len(),
            join_edges = join_tree.edge_count(),
            split_edges = split_tree.edge_count(),
            "merge trees condensed"
        );
        Ok(Self {
            join: join_tree,
            split: split_tree,
            significant,
        })
    }

    /// Returns the condensed join tree.
    #[must_use]
    pub const fn join(&self) -> &DynamicTree {
        &self.join
    }

    /// Returns the condensed split tree.
    #[must_use]
    pub const fn split(&self) -> &DynamicTree {
        &self.split
    }

    /// Returns the vertices kept in both trees.
    #[must_use]
    pub const fn significant_vertices(&self) -> &BTreeSet<VertexId> {
        &self.significant
    }

    /// Consumes the pair and returns `(join, split)`.
    #[must_use]
    pub fn into_parts(self) -> (DynamicTree, DynamicTree) {
        (self.join, self.split)
    }
}
