//! Union-find (disjoint set union) used by the merge-tree sweep.
//!
//! The sweep registers vertices lazily in sweep order, so labels that have not
//! been registered yet report no component at all. That distinction tells the
//! sweep which neighbours have already been processed. Each component also
//! records its boundary vertex: the most recently swept vertex that anchors
//! the next tree edge into the component.

use crate::vertex::VertexId;

/// Incremental disjoint sets over vertex labels with union by rank and path
/// compression.
///
/// Labels index dense slots, so registering label `n` reserves room for
/// `0..=n`. The label `usize::MAX` cannot be registered.
///
/// # Examples
/// ```
/// use contour_core::{DisjointSet, VertexId};
///
/// let (a, b) = (VertexId::new(0), VertexId::new(1));
/// let mut sets = DisjointSet::new();
/// assert_eq!(sets.find(a), None);
///
/// sets.make_set(a);
/// sets.make_set(b);
/// let root = sets.union(a, b).expect("both labels are registered");
/// assert_eq!(root, b);
/// assert_eq!(sets.find(a), Some(b));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DisjointSet {
    parent: Vec<Option<usize>>,
    rank: Vec<u8>,
    boundary: Vec<Option<usize>>,
}

impl DisjointSet {
    /// Creates an empty structure.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty structure with room for labels `0..capacity`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            parent: vec![None; capacity],
            rank: vec![0; capacity],
            boundary: vec![None; capacity],
        }
    }

    /// Registers `label` as a fresh singleton of rank zero whose boundary
    /// vertex is itself.
    ///
    /// Returns `false`, leaving the structure untouched, for `usize::MAX`.
    pub fn make_set(&mut self, label: VertexId) -> bool {
        let index = label.index();
        let Some(len) = index.checked_add(1) else {
            return false;
        };
        if len > self.parent.len() {
            self.parent.resize(len, None);
            self.rank.resize(len, 0);
            self.boundary.resize(len, None);
        }
        let (Some(parent), Some(rank), Some(boundary)) = (
            self.parent.get_mut(index),
            self.rank.get_mut(index),
            self.boundary.get_mut(index),
        ) else {
            return false;
        };
        *parent = Some(index);
        *rank = 0;
        *boundary = Some(index);
        true
    }

    /// Returns whether `label` has been registered.
    #[must_use]
    pub fn contains(&self, label: VertexId) -> bool {
        self.parent_of(label.index()).is_some()
    }

    fn parent_of(&self, index: usize) -> Option<usize> {
        self.parent.get(index).copied().flatten()
    }

    /// Returns the representative of `label`'s component, or `None` when the
    /// label was never registered.
    ///
    /// Every ancestor visited on the way is re-pointed directly at the root.
    pub fn find(&mut self, label: VertexId) -> Option<VertexId> {
        let mut root = label.index();
        let mut next = self.parent_of(root)?;
        while next != root {
            root = next;
            next = self.parent_of(root)?;
        }

        let mut node = label.index();
        while let Some(slot) = self.parent.get_mut(node) {
            match *slot {
                Some(parent) if parent != root => {
                    *slot = Some(root);
                    node = parent;
                }
                _ => break,
            }
        }

        Some(VertexId::new(root))
    }

    /// Merges the components containing `left` and `right`.
    ///
    /// The lower-rank root is attached beneath the higher-rank root. On a rank
    /// tie `left`'s root is attached beneath `right`'s root, whose rank then
    /// grows by one. Returns the surviving root, or `None` when either label
    /// is unregistered.
    pub fn union(&mut self, left: VertexId, right: VertexId) -> Option<VertexId> {
        let left_root = self.find(left)?.index();
        let right_root = self.find(right)?.index();
        if left_root == right_root {
            return Some(VertexId::new(left_root));
        }

        let left_rank = self.rank.get(left_root).copied().unwrap_or_default();
        let right_rank = self.rank.get(right_root).copied().unwrap_or_default();
        let (parent, child) = if left_rank > right_rank {
            (left_root, right_root)
        } else {
            (right_root, left_root)
        };
        *self.parent.get_mut(child)? = Some(parent);
        if left_rank == right_rank {
            *self.rank.get_mut(parent)? = right_rank.saturating_add(1);
        }
        Some(VertexId::new(parent))
    }

    /// Returns the boundary vertex recorded for the component rooted at
    /// `root`.
    #[must_use]
    pub fn boundary(&self, root: VertexId) -> Option<VertexId> {
        self.boundary
            .get(root.index())
            .copied()
            .flatten()
            .map(VertexId::new)
    }

    /// Records `vertex` as the boundary of the component rooted at `root`.
    pub fn set_boundary(&mut self, root: VertexId, vertex: VertexId) {
        if let Some(slot) = self.boundary.get_mut(root.index()) {
            *slot = Some(vertex.index());
        }
    }

    #[cfg(test)]
    fn rank_of(&self, label: VertexId) -> u8 {
        self.rank[label.index()]
    }
}
