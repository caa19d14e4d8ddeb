//! Command-line interface for computing tree–cotree gauges.
//!
//! The `gauge` command reads a JSON mesh document, runs the gauge and prints
//! the cotree mask. With `--plot` it also writes the tree as line segments
//! for an external plotting tool.

mod commands;
mod document;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GaugeCommand, StrategyArg, render_summary, run_cli,
};
pub use document::{CouplingDoc, MeshDocument, PlotDocument, PlotSegment};

#[cfg(test)]
mod test_helpers;
