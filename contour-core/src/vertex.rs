//! Vertex handles shared by meshes, fields, and trees.

use std::fmt;

/// Opaque handle indexing a mesh vertex.
///
/// Identity is value equality, so handles can key maps and sets directly.
///
/// # Examples
/// ```
/// use contour_core::VertexId;
///
/// let vertex = VertexId::new(3);
/// assert_eq!(vertex.index(), 3);
/// assert_eq!(vertex, VertexId::from(3));
/// assert_eq!(vertex.to_string(), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    /// Creates a handle for the vertex at `index`.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Returns the position of the vertex in the mesh's vertex array.
    #[rustfmt::skip]
    #[must_use]
    pub const fn index(self) -> usize { self.0 }
}

impl From<usize> for VertexId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
