//! JSON input envelope describing a materialised mesh and scalar field.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use contour_core::{AdjacencyList, ContourTreeError, ScalarField};
use serde::Deserialize;
use tracing::{Span, field, instrument};

use super::commands::CliError;

/// Adjacency and field as read from disk.
///
/// `values` holds one scalar per vertex; `edges` and `triangles` are optional
/// and are combined into one neighbour list.
///
/// # Examples
/// ```
/// use contour_cli::cli::MeshEnvelope;
///
/// let envelope: MeshEnvelope =
///     serde_json::from_str(r#"{"values": [0.0, 1.0], "edges": [[0, 1]]}"#)?;
/// assert_eq!(envelope.values.len(), 2);
/// assert!(envelope.triangles.is_empty());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MeshEnvelope {
    /// Scalar value per vertex.
    pub values: Vec<f64>,
    /// Undirected edges as index pairs.
    #[serde(default)]
    pub edges: Vec<(usize, usize)>,
    /// Triangular faces; each contributes its three sides.
    #[serde(default)]
    pub triangles: Vec<[usize; 3]>,
}

impl MeshEnvelope {
    /// Validates the envelope and builds the pipeline inputs.
    ///
    /// # Errors
    /// Returns [`ContourTreeError::InvalidVertex`] for out-of-range indices
    /// and [`ContourTreeError::NonFiniteValue`] for NaN or infinite values.
    pub fn into_input(self, name: &str) -> Result<MeshInput, ContourTreeError> {
        let mesh = AdjacencyList::from_parts(self.values.len(), &self.edges, &self.triangles)?
            .with_name(name);
        let field = ScalarField::new(self.values)?;
        Ok(MeshInput {
            name: name.to_owned(),
            mesh,
            field,
        })
    }
}

/// Validated mesh and field ready for the pipeline.
#[derive(Debug, Clone)]
pub struct MeshInput {
    /// Name derived from the input file.
    pub name: String,
    /// Mesh adjacency.
    pub mesh: AdjacencyList,
    /// Scalar field over the mesh.
    pub field: ScalarField,
}

/// Reads and validates the envelope stored at `path`.
///
/// # Errors
/// Returns [`CliError::Io`] when the file cannot be opened,
/// [`CliError::Parse`] when it is not a valid envelope, and
/// [`CliError::Core`] when the envelope fails validation.
#[instrument(
    name = "cli.load_input",
    err,
    fields(path = field::Empty, vertices = field::Empty),
)]
pub fn load_input(path: &Path) -> Result<MeshInput, CliError> {
    let span = Span::current();
    span.record("path", field::display(path.display()));

    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let envelope: MeshEnvelope =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    span.record("vertices", envelope.values.len());

    Ok(envelope.into_input(&derive_input_name(path))?)
}

pub(super) fn derive_input_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "input".to_owned(), ToOwned::to_owned)
}
