//! Support library for the `contour` binary.
//!
//! Exposes the command and logging modules so doctests and unit tests can
//! drive the commands without spawning a subprocess.

pub mod cli;
pub mod logging;
