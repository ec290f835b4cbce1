//! Contour-tree construction core library.
//!
//! The pipeline sweeps a scalar field over a mesh twice (descending for the
//! join tree, ascending for the split tree), condenses both merge trees to
//! their significant vertices, and merges them into the contour tree by
//! repeatedly pruning leaves. Trees can be exported as DOT text with an
//! invisible rank scaffold so a layout engine orders nodes by value rank.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod field;
mod mesh;
mod pipeline;
mod prune;
mod reduce;
mod sweep;
mod tree;
mod union_find;
mod vertex;

#[cfg(test)]
mod property;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::ContourTreeBuilder,
    error::{ContourTreeError, ContourTreeErrorCode, Result, TreeError, TreeErrorCode},
    field::ScalarField,
    mesh::{AdjacencyList, MeshAdjacency},
    pipeline::{ContourTree, ContourTreePipeline, compute_contour_tree},
    prune::{PruneOutcome, merge_significant_trees},
    reduce::SignificantTrees,
    sweep::{MergeTreeSweep, SweepDirection, sweep},
    tree::{DynamicTree, SignificantNodes, TreeKind},
    union_find::DisjointSet,
    vertex::VertexId,
};
