//! Classification of topologically significant tree nodes.

use std::collections::BTreeSet;

use super::DynamicTree;
use crate::{error::TreeError, vertex::VertexId};

/// Significant vertices of a tree together with the significant roots.
///
/// A node is significant when it is a root, a leaf, or a merge point with more
/// than one parent. Contour trees additionally mark split points with more
/// than one child.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SignificantNodes {
    significant: BTreeSet<VertexId>,
    roots: BTreeSet<VertexId>,
}

impl SignificantNodes {
    /// Returns every significant vertex.
    #[must_use]
    pub const fn significant(&self) -> &BTreeSet<VertexId> {
        &self.significant
    }

    /// Returns the significant vertices that are roots.
    #[must_use]
    pub const fn roots(&self) -> &BTreeSet<VertexId> {
        &self.roots
    }

    /// Returns whether `vertex` is significant.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.significant.contains(&vertex)
    }

    /// Returns the number of significant vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.significant.len()
    }

    /// Returns whether no vertex is significant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.significant.is_empty()
    }

    /// Returns the union of both significant sets.
    #[must_use]
    pub fn merged_with(&self, other: &Self) -> BTreeSet<VertexId> {
        self.significant
            .union(&other.significant)
            .copied()
            .collect()
    }
}

impl DynamicTree {
    /// Classifies every node of the tree.
    ///
    /// # Errors
    /// Returns [`TreeError::InvariantViolation`] when any node of a join or
    /// split tree, roots and merge nodes included, has more than one child.
    pub fn compute_significant_nodes(&self) -> Result<SignificantNodes, TreeError> {
        let mut nodes = SignificantNodes::default();
        for node in self.live_nodes() {
            let vertex = node.vertex;
            let splits = node.children.len() > 1;
            if splits && !self.kind.allows_splits() {
                return Err(TreeError::InvariantViolation {
                    invariant: "merge tree node has more than one child",
                    vertex,
                });
            }
            if node.parents.is_empty() {
                nodes.significant.insert(vertex);
                nodes.roots.insert(vertex);
            } else if node.children.is_empty() || node.parents.len() > 1 || splits {
                nodes.significant.insert(vertex);
            }
        }
        Ok(nodes)
    }
}
