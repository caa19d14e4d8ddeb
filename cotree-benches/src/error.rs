//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! setup functions can propagate failures with `?` instead of `.expect()`.

use cotree_core::{GaugeError, InputError};

use crate::mesh::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic mesh generation failed.
    #[error("synthetic mesh generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The gauge rejected its configuration or the generated mesh.
    #[error("gauge failed: {0}")]
    Gauge(#[from] GaugeError),
    /// Edge classification rejected the generated mesh.
    #[error("classification failed: {0}")]
    Input(#[from] InputError),
}
