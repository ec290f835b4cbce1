//! Property-based tests for the contour-tree pipeline.
//!
//! Generates simply connected meshes (paths, random trees and triangulated
//! grids) carrying distinct scalar values, then checks the structural
//! invariants of the merge trees, the merged contour tree, and the
//! union-find that drives the sweeps.

mod strategies;
mod structural;
mod types;
