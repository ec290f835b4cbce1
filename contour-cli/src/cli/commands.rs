//! Command implementations and argument parsing for the contour CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use contour_core::{ContourTreeBuilder, ContourTreeError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::input::load_input;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "contour",
    about = "Build contour trees from a scalar field over a mesh."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print a tree in Graphviz DOT format.
    Dot(DotCommand),
    /// Print vertex, edge and prune counts for the contour tree.
    Summary(SummaryCommand),
}

/// Options accepted by the `dot` command.
#[derive(Debug, Args, Clone)]
pub struct DotCommand {
    /// Path to the JSON envelope holding `values`, `edges` and `triangles`.
    pub path: PathBuf,

    /// Pipeline stage to render.
    #[arg(long, value_enum, default_value_t = Stage::Contour)]
    pub stage: Stage,

    /// Keep only the contour tree's significant vertices.
    #[arg(long)]
    pub simplify: bool,
}

/// Options accepted by the `summary` command.
#[derive(Debug, Args, Clone)]
pub struct SummaryCommand {
    /// Path to the JSON envelope holding `values`, `edges` and `triangles`.
    pub path: PathBuf,

    /// Keep only the contour tree's significant vertices.
    #[arg(long)]
    pub simplify: bool,
}

/// Tree rendered by the `dot` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stage {
    /// The merged contour tree.
    Contour,
    /// The condensed join tree.
    Join,
    /// The condensed split tree.
    Split,
}

impl Stage {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Contour => "contour",
            Self::Join => "join",
            Self::Split => "split",
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The input file is not a valid JSON envelope.
    #[error("failed to parse `{path}`: {source}")]
    Parse {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Input validation or tree construction failed.
    #[error(transparent)]
    Core(#[from] ContourTreeError),
}

/// Counts describing a computed contour tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Name derived from the input file.
    pub input: String,
    /// Number of mesh vertices.
    pub mesh_vertices: usize,
    /// Number of contour-tree nodes.
    pub nodes: usize,
    /// Number of contour-tree edges.
    pub edges: usize,
    /// Number of nodes without parents.
    pub roots: usize,
    /// Number of nodes without children.
    pub leaves: usize,
    /// Number of vertices removed by the leaf-pruning merge.
    pub pruned: usize,
    /// Whether the tree was simplified.
    pub simplified: bool,
}

/// Result of a CLI command, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// DOT text produced by the `dot` command.
    Dot(String),
    /// Counts produced by the `summary` command.
    Summary(ExecutionSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the input cannot be read or the pipeline fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use contour_cli::cli::{Cli, Command, CommandOutput, SummaryCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), r#"{"values": [0, 2, 1], "edges": [[0, 1], [1, 2]]}"#)?;
/// let cli = Cli {
///     command: Command::Summary(SummaryCommand {
///         path: file.path().to_path_buf(),
///         simplify: false,
///     }),
/// };
/// let CommandOutput::Summary(summary) = run_cli(cli)? else {
///     panic!("summary expected");
/// };
/// assert_eq!(summary.edges, 2);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<CommandOutput, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Dot(command) => {
            span.record("command", "dot");
            run_dot(&command).map(CommandOutput::Dot)
        }
        Command::Summary(command) => {
            span.record("command", "summary");
            run_summary(&command).map(CommandOutput::Summary)
        }
    }
}

#[instrument(
    name = "cli.dot",
    err,
    skip(command),
    fields(stage = command.stage.as_str(), simplify = command.simplify),
)]
pub(super) fn run_dot(command: &DotCommand) -> Result<String, CliError> {
    let input = load_input(&command.path)?;
    let pipeline = ContourTreeBuilder::new()
        .with_simplify(command.simplify)
        .build();

    let dot = match command.stage {
        Stage::Contour => pipeline.run(&input.mesh, &input.field)?.to_dot(),
        Stage::Join => pipeline
            .significant_trees(&input.mesh, &input.field)?
            .join()
            .to_dot(),
        Stage::Split => pipeline
            .significant_trees(&input.mesh, &input.field)?
            .split()
            .to_dot(),
    };

    info!(
        input = input.name.as_str(),
        stage = command.stage.as_str(),
        "dot rendered"
    );
    Ok(dot)
}

#[instrument(
    name = "cli.summary",
    err,
    skip(command),
    fields(simplify = command.simplify),
)]
pub(super) fn run_summary(command: &SummaryCommand) -> Result<ExecutionSummary, CliError> {
    let input = load_input(&command.path)?;
    let contour = ContourTreeBuilder::new()
        .with_simplify(command.simplify)
        .build()
        .run(&input.mesh, &input.field)?;

    let tree = contour.tree();
    let summary = ExecutionSummary {
        mesh_vertices: input.field.len(),
        nodes: tree.len(),
        edges: tree.edge_count(),
        roots: tree.roots().len(),
        leaves: tree.leaves().len(),
        pruned: contour.prune_order().len(),
        simplified: command.simplify,
        input: input.name,
    };
    info!(
        input = summary.input.as_str(),
        nodes = summary.nodes,
        edges = summary.edges,
        "summary computed"
    );
    Ok(summary)
}

/// Renders `output` to `writer`.
///
/// DOT text is written verbatim followed by a newline; summaries are written
/// as `key: value` lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use contour_cli::cli::{CommandOutput, render_output};
/// let mut buffer = Vec::new();
/// render_output(&CommandOutput::Dot("digraph G {\n}".into()), &mut buffer)?;
/// assert_eq!(buffer, b"digraph G {\n}\n");
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_output(output: &CommandOutput, mut writer: impl Write) -> io::Result<()> {
    match output {
        CommandOutput::Dot(dot) => writeln!(writer, "{dot}"),
        CommandOutput::Summary(summary) => {
            writeln!(writer, "input: {}", summary.input)?;
            writeln!(writer, "mesh vertices: {}", summary.mesh_vertices)?;
            writeln!(writer, "nodes: {}", summary.nodes)?;
            writeln!(writer, "edges: {}", summary.edges)?;
            writeln!(writer, "roots: {}", summary.roots)?;
            writeln!(writer, "leaves: {}", summary.leaves)?;
            writeln!(writer, "pruned: {}", summary.pruned)?;
            writeln!(writer, "simplified: {}", summary.simplified)
        }
    }
}
