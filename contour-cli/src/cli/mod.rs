//! Command-line interface for the contour-tree pipeline.
//!
//! Each command reads a JSON envelope holding a scalar field and the mesh
//! adjacency, runs the pipeline, and renders either DOT text or a summary.

mod commands;
mod input;

pub use commands::{
    Cli, CliError, Command, CommandOutput, DotCommand, ExecutionSummary, Stage, SummaryCommand,
    render_output, run_cli,
};
pub use input::{MeshEnvelope, MeshInput, load_input};
