//! Small helpers shared across CLI tests.
//!
//! The CLI tests write mesh documents to temporary directories and assert on
//! the resulting summaries and errors.

use std::fs;
use std::io;
use std::path::PathBuf;

use tempfile::TempDir;

use super::{Cli, CliError, Command, GaugeCommand, StrategyArg, run_cli};

/// Closed square with one constrained edge and planar coordinates.
pub(super) const SQUARE: &str = r#"{
    "vertex_count": 4,
    "edges": [[0, 1], [1, 2], [2, 3], [3, 0]],
    "dofs": ["free", "free", "free", "constrained"],
    "coordinates": [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
}"#;

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_document(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// `gauge` command with default options for `path`.
pub(super) fn gauge_command(path: PathBuf) -> GaugeCommand {
    GaugeCommand {
        path,
        name: None,
        strategy: StrategyArg::Auto,
        parallel_threshold: cotree_core::DEFAULT_PARALLEL_THRESHOLD,
        plot: None,
    }
}

pub(super) fn cli(command: GaugeCommand) -> Cli {
    Cli {
        command: Command::Gauge(command),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
