//! Contour-tree assembly by pruning leaves of the significant merge trees.
//!
//! A vertex is prunable when it is a leaf of one merge tree (no parents) and
//! has exactly one parent in the other. Pruning an upper leaf emits its join
//! tree edge; pruning a lower leaf emits its split tree edge, reversed so the
//! contour tree always points from higher to lower values. The pruned vertex
//! is then reduced out of both trees, which may expose a new leaf.

use std::collections::{HashSet, VecDeque};

use tracing::{debug, instrument};

use crate::{
    error::{Result, TreeError},
    tree::{DynamicTree, TreeKind},
    vertex::VertexId,
};

/// Contour tree produced by the merge together with the order in which
/// vertices were taken off the leaf queue.
#[derive(Clone, Debug, PartialEq)]
pub struct PruneOutcome {
    tree: DynamicTree,
    prune_order: Vec<VertexId>,
}

impl PruneOutcome {
    /// Returns the contour tree.
    #[must_use]
    pub const fn tree(&self) -> &DynamicTree {
        &self.tree
    }

    /// Returns the vertices in the order they were dequeued.
    #[must_use]
    pub fn prune_order(&self) -> &[VertexId] {
        &self.prune_order
    }

    /// Consumes the outcome and returns the contour tree.
    #[must_use]
    pub fn into_tree(self) -> DynamicTree {
        self.tree
    }

    /// Consumes the outcome and returns the tree and the dequeue order.
    #[must_use]
    pub fn into_parts(self) -> (DynamicTree, Vec<VertexId>) {
        (self.tree, self.prune_order)
    }
}

struct LeafQueue {
    queue: VecDeque<VertexId>,
    enqueued: HashSet<VertexId>,
}

impl LeafQueue {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            enqueued: HashSet::with_capacity(capacity),
        }
    }

    /// Queues `vertex` unless it has been queued before.
    fn push(&mut self, vertex: VertexId) {
        if self.enqueued.insert(vertex) {
            self.queue.push_back(vertex);
        }
    }

    fn pop(&mut self) -> Option<VertexId> {
        self.queue.pop_front()
    }
}

/// Merges the significant join and split trees into the contour tree.
///
/// Both trees must hold the same vertex set; they are consumed because the
/// merge reduces pruned vertices out of them.
///
/// # Errors
/// Returns [`crate::ContourTreeError::Tree`] when the trees disagree on their
/// vertex sets or when a pruned leaf has more than one child in the tree it is
/// pruned from.
///
/// # Examples
/// ```
/// use contour_core::{
///     AdjacencyList, ScalarField, SignificantTrees, SweepDirection, VertexId,
///     merge_significant_trees, sweep,
/// };
///
/// let mesh = AdjacencyList::from_edges(3, &[(0, 1), (1, 2)])?;
/// let field = ScalarField::new(vec![0.0, 1.0, 2.0])?;
/// let join = sweep(&mesh, &field, SweepDirection::Descending)?;
/// let split = sweep(&mesh, &field, SweepDirection::Ascending)?;
/// let (join, split) = SignificantTrees::from_merge_trees(join.tree(), split.tree())?.into_parts();
///
/// let outcome = merge_significant_trees(join, split)?;
/// assert_eq!(outcome.tree().edges(), vec![(VertexId::new(2), VertexId::new(0))]);
/// # Ok::<(), contour_core::ContourTreeError>(())
/// ```
#[instrument(name = "core.prune", err, skip(join, split), fields(vertices = join.len()))]
pub fn merge_significant_trees(
    mut join: DynamicTree,
    mut split: DynamicTree,
) -> Result<PruneOutcome> {
    let mut contour = DynamicTree::with_capacity(TreeKind::Contour, join.len());
    let mut leaves = LeafQueue::with_capacity(join.len());
    for vertex in join.vertices() {
        let value = join
            .value(vertex)
            .ok_or(TreeError::UnknownVertex { vertex })?;
        contour.add_node(vertex, value);
        if is_prunable(&join, &split, vertex)? {
            leaves.push(vertex);
        }
    }

    let mut prune_order = Vec::with_capacity(join.len());
    while let Some(leaf) = leaves.pop() {
        prune_order.push(leaf);
        let upper = join.degree(leaf)? == 0;
        let source = if upper { &join } else { &split };
        let Some(next) = sole_child(source, leaf)? else {
            continue;
        };

        if upper {
            contour.connect_nodes(leaf, next)?;
        } else {
            contour.connect_nodes(next, leaf)?;
        }
        join.reduce_vert(leaf)?;
        split.reduce_vert(leaf)?;

        if is_prunable(&join, &split, next)? {
            leaves.push(next);
        }
    }

    debug!(
        edges = contour.edge_count(),
        pruned = prune_order.len(),
        "contour tree assembled"
    );
    Ok(PruneOutcome {
        tree: contour,
        prune_order,
    })
}

fn is_prunable(join: &DynamicTree, split: &DynamicTree, vertex: VertexId) -> Result<bool> {
    let up = join.degree(vertex)?;
    let down = split.degree(vertex)?;
    Ok((up == 0 && down == 1) || (down == 0 && up == 1))
}

fn sole_child(tree: &DynamicTree, vertex: VertexId) -> Result<Option<VertexId>> {
    let children = tree.children(vertex)?;
    if children.len() > 1 {
        return Err(TreeError::InvariantViolation {
            invariant: "pruned leaf must have at most one child",
            vertex,
        }
        .into());
    }
    Ok(children.first().copied())
}
