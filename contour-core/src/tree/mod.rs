//! Mutable directed trees over mesh vertices.
//!
//! [`DynamicTree`] backs every stage of the pipeline: the join and split
//! trees produced by the sweeps, their condensed significant forms, and the
//! final contour tree. Nodes live in a single arena addressed through a
//! vertex lookup, and every parent and child set is ordered by vertex so
//! iteration is deterministic.

mod condense;
mod dot;
mod significance;

use std::collections::{BTreeMap, BTreeSet};

use crate::{error::TreeError, vertex::VertexId};

pub use self::significance::SignificantNodes;

/// Role of a tree in the pipeline.
///
/// Join and split trees are merge trees in which every node has at most one
/// child. A contour tree may also split downwards.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TreeKind {
    /// Merge tree of superlevel sets built by the descending sweep.
    Join,
    /// Merge tree of sublevel sets built by the ascending sweep.
    Split,
    /// Contour tree produced by merging the join and split trees.
    Contour,
}

impl TreeKind {
    /// Returns whether nodes of this kind may have more than one child.
    #[must_use]
    pub const fn allows_splits(self) -> bool {
        matches!(self, Self::Contour)
    }

    /// Returns a lowercase label used in logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Split => "split",
            Self::Contour => "contour",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct TreeNode {
    vertex: VertexId,
    value: f64,
    parents: BTreeSet<VertexId>,
    children: BTreeSet<VertexId>,
}

impl TreeNode {
    const fn new(vertex: VertexId, value: f64) -> Self {
        Self {
            vertex,
            value,
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
        }
    }
}

/// Arena-backed directed tree keyed by vertex.
///
/// # Examples
/// ```
/// use contour_core::{DynamicTree, TreeKind, VertexId};
///
/// let (a, b, c) = (VertexId::new(0), VertexId::new(1), VertexId::new(2));
/// let mut tree = DynamicTree::new(TreeKind::Join);
/// tree.add_node(a, 3.0);
/// tree.add_node(b, 2.0);
/// tree.add_node(c, 1.0);
/// tree.connect_nodes(a, b)?;
/// tree.connect_nodes(b, c)?;
///
/// tree.reduce_vert(b)?;
/// assert_eq!(tree.edges(), vec![(a, c)]);
/// # Ok::<(), contour_core::TreeError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicTree {
    kind: TreeKind,
    slots: Vec<Option<TreeNode>>,
    lookup: BTreeMap<VertexId, usize>,
}

impl DynamicTree {
    /// Creates an empty tree of the given kind.
    #[must_use]
    pub const fn new(kind: TreeKind) -> Self {
        Self {
            kind,
            slots: Vec::new(),
            lookup: BTreeMap::new(),
        }
    }

    /// Creates an empty tree with arena room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(kind: TreeKind, capacity: usize) -> Self {
        Self {
            kind,
            slots: Vec::with_capacity(capacity),
            lookup: BTreeMap::new(),
        }
    }

    /// Returns the tree's role.
    #[must_use]
    pub const fn kind(&self) -> TreeKind {
        self.kind
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Returns whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Returns whether `vertex` has a node in the tree.
    #[must_use]
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.lookup.contains_key(&vertex)
    }

    /// Returns the scalar value stored with `vertex`.
    #[must_use]
    pub fn value(&self, vertex: VertexId) -> Option<f64> {
        self.node(vertex).ok().map(|node| node.value)
    }

    /// Iterates over live vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.lookup.keys().copied()
    }

    /// Inserts a node for `vertex` unless one already exists.
    ///
    /// Returns `true` when a node was created. An existing node keeps its
    /// original value.
    pub fn add_node(&mut self, vertex: VertexId, value: f64) -> bool {
        if self.lookup.contains_key(&vertex) {
            return false;
        }
        self.lookup.insert(vertex, self.slots.len());
        self.slots.push(Some(TreeNode::new(vertex, value)));
        true
    }

    /// Adds the directed edge `parent -> child`.
    ///
    /// Connecting an existing edge again leaves the tree unchanged.
    ///
    /// # Errors
    /// Returns [`TreeError::MissingEndpoint`] when either vertex is absent.
    pub fn connect_nodes(&mut self, parent: VertexId, child: VertexId) -> Result<(), TreeError> {
        if !(self.contains(parent) && self.contains(child)) {
            return Err(TreeError::MissingEndpoint { parent, child });
        }
        self.node_mut(parent)?.children.insert(child);
        self.node_mut(child)?.parents.insert(parent);
        Ok(())
    }

    /// Returns the number of parents of `vertex`.
    ///
    /// # Errors
    /// Returns [`TreeError::UnknownVertex`] when `vertex` is absent.
    pub fn degree(&self, vertex: VertexId) -> Result<usize, TreeError> {
        Ok(self.node(vertex)?.parents.len())
    }

    /// Returns whether `vertex` has no parents.
    ///
    /// # Errors
    /// Returns [`TreeError::UnknownVertex`] when `vertex` is absent.
    pub fn is_root(&self, vertex: VertexId) -> Result<bool, TreeError> {
        Ok(self.degree(vertex)? == 0)
    }

    /// Returns the children of `vertex` in ascending vertex order.
    ///
    /// # Errors
    /// Returns [`TreeError::UnknownVertex`] when `vertex` is absent.
    pub fn children(&self, vertex: VertexId) -> Result<&BTreeSet<VertexId>, TreeError> {
        Ok(&self.node(vertex)?.children)
    }

    /// Returns the parents of `vertex` in ascending vertex order.
    ///
    /// # Errors
    /// Returns [`TreeError::UnknownVertex`] when `vertex` is absent.
    pub fn parents(&self, vertex: VertexId) -> Result<&BTreeSet<VertexId>, TreeError> {
        Ok(&self.node(vertex)?.parents)
    }

    /// Returns every edge as `(parent, child)`, sorted.
    #[must_use]
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        self.live_nodes()
            .flat_map(|node| node.children.iter().map(|&child| (node.vertex, child)))
            .collect()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.live_nodes().map(|node| node.children.len()).sum()
    }

    /// Returns the vertices without parents in ascending order.
    #[must_use]
    pub fn roots(&self) -> Vec<VertexId> {
        self.live_nodes()
            .filter(|node| node.parents.is_empty())
            .map(|node| node.vertex)
            .collect()
    }

    /// Returns the vertices without children in ascending order.
    #[must_use]
    pub fn leaves(&self) -> Vec<VertexId> {
        self.live_nodes()
            .filter(|node| node.children.is_empty())
            .map(|node| node.vertex)
            .collect()
    }

    /// Removes `vertex`, splicing its children onto its parent.
    ///
    /// For `a -> b -> c`, reducing `b` leaves `a -> c`. A root is removed and
    /// its children become roots.
    ///
    /// # Errors
    /// Returns [`TreeError::UnknownVertex`] when `vertex` is absent and
    /// [`TreeError::InvariantViolation`] when it has more than one parent.
    pub fn reduce_vert(&mut self, vertex: VertexId) -> Result<(), TreeError> {
        if self.degree(vertex)? > 1 {
            return Err(TreeError::InvariantViolation {
                invariant: "reduced vertex must have at most one parent",
                vertex,
            });
        }
        let node = self.remove_node(vertex)?;
        let parent = node.parents.first().copied();

        for &child in &node.children {
            let child_node = self.node_mut(child)?;
            child_node.parents.remove(&vertex);
            child_node.parents.extend(parent);
        }
        if let Some(parent) = parent {
            let parent_node = self.node_mut(parent)?;
            parent_node.children.remove(&vertex);
            parent_node.children.extend(node.children.iter().copied());
        }
        Ok(())
    }

    fn live_nodes(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.lookup
            .values()
            .filter_map(|&slot| self.slots.get(slot).and_then(Option::as_ref))
    }

    fn node(&self, vertex: VertexId) -> Result<&TreeNode, TreeError> {
        self.lookup
            .get(&vertex)
            .and_then(|&slot| self.slots.get(slot))
            .and_then(Option::as_ref)
            .ok_or(TreeError::UnknownVertex { vertex })
    }

    fn node_mut(&mut self, vertex: VertexId) -> Result<&mut TreeNode, TreeError> {
        self.lookup
            .get(&vertex)
            .and_then(|&slot| self.slots.get_mut(slot))
            .and_then(Option::as_mut)
            .ok_or(TreeError::UnknownVertex { vertex })
    }

    fn remove_node(&mut self, vertex: VertexId) -> Result<TreeNode, TreeError> {
        self.lookup
            .remove(&vertex)
            .and_then(|slot| self.slots.get_mut(slot))
            .and_then(Option::take)
            .ok_or(TreeError::UnknownVertex { vertex })
    }
}
