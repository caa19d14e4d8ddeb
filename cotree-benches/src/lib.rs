//! Benchmark support crate for cotree.
//!
//! Provides synthetic triangulated meshes and parameter types used by the
//! Criterion benchmarks of the gauge stages: edge classification, spanning
//! forest construction, and the full run.

pub mod error;
pub mod mesh;
pub mod params;
