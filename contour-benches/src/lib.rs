//! Benchmark support crate for contour-tree construction.
//!
//! Generates synthetic triangulated terrains and groups the parameters used
//! by the Criterion benchmarks for the sweep, reduce and prune stages.

pub mod error;
pub mod params;
pub mod terrain;
