//! Error types for the contour-tree core library.
//!
//! Defines the tree-level and pipeline-level error enums exposed by the public
//! API, their stable machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::vertex::VertexId;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? $( ( $($tuple:tt)* ) )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? $( ( $($tuple)* ) )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while mutating or classifying a [`crate::DynamicTree`].
///
/// Every variant signals a structural invariant violation in the input or in
/// the construction's own bookkeeping; none of them is recoverable.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum TreeError {
    /// An edge endpoint has not been added to the tree.
    #[error("cannot connect {parent} -> {child}: endpoint missing from the tree")]
    MissingEndpoint {
        /// Requested parent vertex.
        parent: VertexId,
        /// Requested child vertex.
        child: VertexId,
    },
    /// The vertex is not (or no longer) present in the tree.
    #[error("vertex {vertex} is not present in the tree")]
    UnknownVertex {
        /// The vertex that was looked up.
        vertex: VertexId,
    },
    /// A structural invariant of the tree was violated at `vertex`.
    #[error("tree invariant violated at vertex {vertex}: {invariant}")]
    InvariantViolation {
        /// Name of the violated invariant to assist debugging.
        invariant: &'static str,
        /// The offending vertex.
        vertex: VertexId,
    },
}

define_error_codes! {
    /// Stable codes describing [`TreeError`] variants.
    enum TreeErrorCode for TreeError {
        /// An edge endpoint has not been added to the tree.
        MissingEndpoint => MissingEndpoint { .. } => "TREE_MISSING_ENDPOINT",
        /// The vertex is not present in the tree.
        UnknownVertex => UnknownVertex { .. } => "TREE_UNKNOWN_VERTEX",
        /// A structural invariant of the tree was violated.
        InvariantViolation => InvariantViolation { .. } => "TREE_INVARIANT_VIOLATION",
    }
}

/// Error type produced while building a contour tree.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ContourTreeError {
    /// The mesh has no vertices.
    #[error("cannot build a contour tree for an empty mesh")]
    EmptyMesh,
    /// The scalar field does not provide exactly one value per mesh vertex.
    #[error("mesh has {vertices} vertices but the scalar field has {values} values")]
    FieldLengthMismatch {
        /// Number of vertices reported by the mesh.
        vertices: usize,
        /// Number of values held by the field.
        values: usize,
    },
    /// A scalar value was NaN or infinite.
    #[error("scalar value {value} at vertex {vertex} is not finite")]
    NonFiniteValue {
        /// Vertex carrying the invalid value.
        vertex: VertexId,
        /// The rejected value.
        value: f64,
    },
    /// An adjacency entry referenced a vertex outside the mesh.
    #[error("adjacency references vertex {vertex}, but the mesh has {vertex_count} vertices")]
    InvalidVertex {
        /// The out-of-range vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
    /// A tree operation failed during construction.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

define_error_codes! {
    /// Stable codes describing [`ContourTreeError`] variants.
    enum ContourTreeErrorCode for ContourTreeError {
        /// The mesh has no vertices.
        EmptyMesh => EmptyMesh => "CONTOUR_EMPTY_MESH",
        /// The scalar field does not match the mesh size.
        FieldLengthMismatch => FieldLengthMismatch { .. } => "CONTOUR_FIELD_LENGTH_MISMATCH",
        /// A scalar value was NaN or infinite.
        NonFiniteValue => NonFiniteValue { .. } => "CONTOUR_NON_FINITE_VALUE",
        /// An adjacency entry referenced a vertex outside the mesh.
        InvalidVertex => InvalidVertex { .. } => "CONTOUR_INVALID_VERTEX",
        /// A tree operation failed during construction.
        TreeFailure => Tree(..) => "CONTOUR_TREE_FAILURE",
    }
}

impl ContourTreeError {
    /// Retrieve the inner [`TreeErrorCode`] when the error originated in a tree operation.
    #[must_use]
    pub const fn tree_code(&self) -> Option<TreeErrorCode> {
        match self {
            Self::Tree(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, ContourTreeError>;
