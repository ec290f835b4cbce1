//! Condensation of a tree onto a subset of its vertices.
//!
//! The condensed tree keeps only the requested vertices and links each one to
//! the first kept vertices found below it on every downward path.

use std::collections::BTreeSet;

use super::DynamicTree;
use crate::{error::TreeError, vertex::VertexId};

struct CondenseBuilder<'a> {
    source: &'a DynamicTree,
    significant: &'a BTreeSet<VertexId>,
    condensed: DynamicTree,
}

impl<'a> CondenseBuilder<'a> {
    fn new(
        source: &'a DynamicTree,
        significant: &'a BTreeSet<VertexId>,
    ) -> Result<Self, TreeError> {
        let mut condensed = DynamicTree::with_capacity(source.kind, significant.len());
        for &vertex in significant {
            let value = source
                .value(vertex)
                .ok_or(TreeError::UnknownVertex { vertex })?;
            condensed.add_node(vertex, value);
        }
        Ok(Self {
            source,
            significant,
            condensed,
        })
    }

    fn link_from_roots(&mut self, roots: &BTreeSet<VertexId>) -> Result<(), TreeError> {
        let mut visited = BTreeSet::new();
        let mut stack: Vec<VertexId> = roots.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let successors = self.next_significant(current)?;
            for &next in &successors {
                self.condensed.connect_nodes(current, next)?;
            }
            stack.extend(successors.into_iter().rev());
        }
        Ok(())
    }

    /// Walks every branch below `from` until it reaches a significant vertex.
    fn next_significant(&self, from: VertexId) -> Result<BTreeSet<VertexId>, TreeError> {
        let mut found = BTreeSet::new();
        let mut seen = BTreeSet::new();
        let mut stack: Vec<VertexId> = self.source.children(from)?.iter().copied().collect();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            if self.significant.contains(&current) {
                found.insert(current);
            } else {
                stack.extend(self.source.children(current)?.iter().copied());
            }
        }
        Ok(found)
    }

    fn finish(self) -> DynamicTree {
        self.condensed
    }
}

impl DynamicTree {
    /// Builds a tree of the same kind holding exactly `significant`.
    ///
    /// Traversal starts at `roots`. An edge `u -> v` is emitted when `v` is
    /// the first significant vertex on a downward path from `u`; branches that
    /// reconverge on the same vertex produce one edge.
    ///
    /// # Errors
    /// Returns [`TreeError::UnknownVertex`] when a significant vertex or root
    /// is not in this tree, and [`TreeError::MissingEndpoint`] when a root
    /// outside `significant` has significant descendants.
    pub fn condense(
        &self,
        significant: &BTreeSet<VertexId>,
        roots: &BTreeSet<VertexId>,
    ) -> Result<Self, TreeError> {
        let mut builder = CondenseBuilder::new(self, significant)?;
        builder.link_from_roots(roots)?;
        Ok(builder.finish())
    }
}
