//! Command implementations and argument parsing for the cotree CLI.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use cotree_core::{
    DEFAULT_PARALLEL_THRESHOLD, EdgeMesh, ExecutionStrategy, GaugeBuilder, GaugeError,
    GaugeResult, InputError, VertexCoordinates, tree_segments,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::document::{MeshDocument, PlotDocument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "cotree", about = "Compute tree–cotree gauges for edge-element meshes.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compute the cotree mask of a JSON mesh document.
    Gauge(GaugeCommand),
}

/// Options accepted by the `gauge` command.
#[derive(Debug, Args, Clone)]
pub struct GaugeCommand {
    /// Path to the JSON mesh document.
    pub path: PathBuf,

    /// Override name for the mesh (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,

    /// How edges are classified.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Edge count at which `auto` classifies in parallel.
    #[arg(
        long = "parallel-threshold",
        default_value_t = DEFAULT_PARALLEL_THRESHOLD,
        value_parser = clap::value_parser!(usize),
    )]
    pub parallel_threshold: usize,

    /// Write the selected tree as JSON line segments to this path.
    #[arg(long)]
    pub plot: Option<PathBuf>,
}

/// Execution strategies selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel classification for meshes above the threshold.
    Auto,
    /// Classify on the main thread.
    Sequential,
    /// Always classify in parallel.
    Parallel,
}

impl StrategyArg {
    fn label(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        }
    }
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening or creating a file failed.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The mesh document is not valid JSON or does not match the schema.
    #[error("failed to parse mesh document `{path}`: {source}")]
    Parse {
        /// Path of the rejected document.
        path: PathBuf,
        /// Underlying deserialisation error.
        #[source]
        source: serde_json::Error,
    },
    /// The document content violates a precondition outside the gauge run.
    #[error(transparent)]
    Input(#[from] InputError),
    /// `--plot` was requested for a document without coordinates.
    #[error("cannot plot `{path}`: the mesh document has no coordinates")]
    MissingCoordinates {
        /// Path of the mesh document.
        path: PathBuf,
    },
    /// Serialising the plot document failed.
    #[error("failed to write plot `{path}`: {source}")]
    PlotWrite {
        /// Destination of the plot.
        path: PathBuf,
        /// Underlying serialisation error.
        #[source]
        source: serde_json::Error,
    },
    /// The gauge rejected its configuration or input.
    #[error(transparent)]
    Core(#[from] GaugeError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the mesh.
    pub mesh: String,
    /// Number of mesh vertices.
    pub vertices: usize,
    /// Number of mesh edges.
    pub edges: usize,
    /// Tree and masks computed by the gauge.
    pub result: GaugeResult,
    /// Where the plot was written, if requested.
    pub plot: Option<PathBuf>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, gauging or plotting fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use cotree_cli::cli::{Cli, Command, GaugeCommand, StrategyArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     r#"{"vertex_count": 3, "edges": [[0, 1], [1, 2], [2, 0]], "dofs": ["free", "free", "free"]}"#,
/// )?;
/// let cli = Cli {
///     command: Command::Gauge(GaugeCommand {
///         path: file.path().to_path_buf(),
///         name: Some("triangle".into()),
///         strategy: StrategyArg::Auto,
///         parallel_threshold: 1_024,
///         plot: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.result.cotree_mask().ones().collect::<Vec<_>>(), vec![2]);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Gauge(gauge) => {
            Span::current().record("command", field::display("gauge"));
            run_gauge(gauge)
        }
    }
}

#[instrument(
    name = "cli.gauge",
    err,
    skip(command),
    fields(
        path = field::Empty,
        strategy = field::Empty,
        parallel_threshold = field::Empty,
        override_name = field::Empty,
    ),
)]
pub(super) fn run_gauge(command: GaugeCommand) -> Result<ExecutionSummary, CliError> {
    let GaugeCommand {
        path,
        name,
        strategy,
        parallel_threshold,
        plot,
    } = command;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record("strategy", field::display(strategy.label()));
    span.record("parallel_threshold", parallel_threshold);
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );

    let gauge = GaugeBuilder::new()
        .with_execution_strategy(strategy.into())
        .with_parallel_threshold(parallel_threshold)
        .build()?;

    let document = load_document(&path)?;
    if plot.is_some() && !document.has_coordinates() {
        return Err(CliError::MissingCoordinates { path });
    }
    let mesh_name = derive_mesh_name(&path, name.as_deref());
    let (mesh, dofs, map) = document.into_parts(&mesh_name)?;
    let result = gauge.run_with_map(&mesh, &dofs, &map)?;

    if let (Some(destination), Some(coordinates)) = (plot.as_deref(), mesh.coordinates()) {
        write_plot(destination, coordinates, &result)?;
    }

    info!(
        mesh = mesh.name(),
        tree_edges = result.forest().len(),
        cotree_dofs = result.cotree_mask().count_ones(),
        "command completed"
    );
    Ok(ExecutionSummary {
        vertices: mesh.vertex_count(),
        edges: mesh.edge_count(),
        mesh: mesh_name,
        result,
        plot,
    })
}

#[instrument(name = "cli.load_document", err, fields(path = field::Empty))]
pub(super) fn load_document(path: &Path) -> Result<MeshDocument, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    MeshDocument::from_reader(BufReader::new(file)).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[instrument(
    name = "cli.write_plot",
    err,
    skip(coordinates, result),
    fields(segments = field::Empty),
)]
pub(super) fn write_plot(
    path: &Path,
    coordinates: &VertexCoordinates,
    result: &GaugeResult,
) -> Result<(), CliError> {
    let segments = tree_segments(coordinates, result.forest())?;
    Span::current().record("segments", segments.len());
    let document = PlotDocument::new(coordinates, &segments);

    let file = File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &document).map_err(|source| {
        CliError::PlotWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush().map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn derive_mesh_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "mesh".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// The header lists the mesh and tree statistics; each following line holds
/// a DOF index and its cotree bit.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let result = &summary.result;
    let mask = result.cotree_mask();
    writeln!(writer, "mesh: {}", summary.mesh)?;
    writeln!(writer, "vertices: {}", summary.vertices)?;
    writeln!(writer, "edges: {}", summary.edges)?;
    writeln!(writer, "dofs: {}", mask.len())?;
    writeln!(writer, "tree edges: {}", result.forest().len())?;
    writeln!(writer, "components: {}", result.forest().component_count())?;
    writeln!(writer, "cotree dofs: {}", mask.count_ones())?;
    if let Some(plot) = &summary.plot {
        writeln!(writer, "plot: {}", plot.display())?;
    }
    for (dof, &active) in mask.as_slice().iter().enumerate() {
        writeln!(writer, "{dof}\t{}", u8::from(active))?;
    }
    Ok(())
}
