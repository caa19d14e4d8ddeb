//! Tree–cotree gauge selection for edge-element (H(curl)) meshes.
//!
//! The curl-curl operator annihilates gradients of nodal functions, so an
//! edge-element system is singular until the DOFs on a spanning forest of the
//! vertex graph are eliminated. This crate selects that forest among the
//! edges carrying an active DOF and returns the remaining (cotree) DOFs as a
//! mask.
//!
//! Edges whose DOF is not free are tried first, keeping as many free DOFs as
//! possible in the cotree. Within each class the mesh order breaks ties, so
//! identical input always yields an identical gauge.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod classify;
mod diagnostics;
mod dof;
mod error;
mod forest;
mod gauge;
mod mask;
mod mesh;
mod union_find;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    classify::{ClassificationMode, ClassifiedEdge, EdgeClass, EdgeOrdering, classify_edges},
    diagnostics::{TreeSegment, tree_segments},
    dof::{DofClassifier, DofCoupling, DofIndices, DofMap, DofMask, DofTable},
    error::{GaugeError, GaugeErrorCode, InputError, InputErrorCode, Result},
    forest::{SpanningForest, build_spanning_forest},
    gauge::{
        DEFAULT_PARALLEL_THRESHOLD, ExecutionStrategy, GaugeBuilder, GaugeResult, TreeCotreeGauge,
    },
    mask::cotree_mask,
    mesh::{Dimension, EdgeListMesh, EdgeMesh, VertexCoordinates},
    union_find::DisjointSet,
};
