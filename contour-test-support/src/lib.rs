//! Shared test utilities used across contour crates.

pub mod ci;
pub mod tracing;
