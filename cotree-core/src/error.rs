//! Error types for the cotree core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::gauge::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A precondition violation in the mesh or DOF classification handed to the
/// gauge.
///
/// Every variant is reported before any output is produced.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InputError {
    /// The mesh declares no vertices.
    #[error("mesh has no vertices")]
    EmptyMesh,
    /// The edge list and the DOF universe disagree in size under the implicit
    /// numbering.
    #[error("mesh has {edges} edges but the DOF classification covers {dofs} DOFs")]
    EdgeCountMismatch {
        /// Number of edges in the mesh.
        edges: usize,
        /// Number of DOFs known to the classifier.
        dofs: usize,
    },
    /// An explicit edge-to-DOF map does not cover every mesh edge exactly once.
    #[error("DOF map has {map} entries but the mesh has {edges} edges")]
    DofMapLengthMismatch {
        /// Number of entries in the map.
        map: usize,
        /// Number of edges in the mesh.
        edges: usize,
    },
    /// An edge maps to a DOF index outside the classifier's universe.
    #[error("edge {edge} maps to DOF {dof}, but dof_count is {dof_count}")]
    DofOutOfRange {
        /// Mesh edge index.
        edge: usize,
        /// Offending DOF index.
        dof: usize,
        /// Size of the DOF universe.
        dof_count: usize,
    },
    /// Two edges map to the same DOF, so the map is not injective.
    #[error("edges {first_edge} and {second_edge} both map to DOF {dof}")]
    DuplicateDof {
        /// DOF index targeted twice.
        dof: usize,
        /// Earlier edge mapped to `dof`.
        first_edge: usize,
        /// Later edge mapped to `dof`.
        second_edge: usize,
    },
    /// An edge references a vertex outside `[0, vertex_count)`.
    #[error("edge {edge} references vertex {vertex}, but vertex_count is {vertex_count}")]
    VertexOutOfRange {
        /// Mesh edge index.
        edge: usize,
        /// Offending vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
    /// The mesh reported an edge count but could not resolve one of its edges.
    #[error("mesh reports {edge_count} edges but edge {edge} is missing")]
    MissingEdge {
        /// Edge index that could not be resolved.
        edge: usize,
        /// Edge count reported by the mesh.
        edge_count: usize,
    },
    /// Vertex coordinates do not cover every vertex exactly once.
    #[error("{coordinates} coordinates supplied for {vertex_count} vertices")]
    CoordinateCountMismatch {
        /// Number of coordinate entries.
        coordinates: usize,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`InputError`] variants.
    enum InputErrorCode for InputError {
        /// The mesh declares no vertices.
        EmptyMesh => EmptyMesh => "INPUT_EMPTY_MESH",
        /// The edge list and the DOF universe disagree in size.
        EdgeCountMismatch => EdgeCountMismatch { .. } => "INPUT_EDGE_COUNT_MISMATCH",
        /// An explicit edge-to-DOF map does not cover every mesh edge.
        DofMapLengthMismatch => DofMapLengthMismatch { .. } => "INPUT_DOF_MAP_LENGTH_MISMATCH",
        /// An edge maps to a DOF index outside the classifier's universe.
        DofOutOfRange => DofOutOfRange { .. } => "INPUT_DOF_OUT_OF_RANGE",
        /// Two edges map to the same DOF.
        DuplicateDof => DuplicateDof { .. } => "INPUT_DUPLICATE_DOF",
        /// An edge references a vertex outside the mesh.
        VertexOutOfRange => VertexOutOfRange { .. } => "INPUT_VERTEX_OUT_OF_RANGE",
        /// The mesh could not resolve one of its edges.
        MissingEdge => MissingEdge { .. } => "INPUT_MISSING_EDGE",
        /// Vertex coordinates do not cover every vertex.
        CoordinateCountMismatch => CoordinateCountMismatch { .. } => "INPUT_COORDINATE_COUNT_MISMATCH",
    }
}

/// Error type produced when constructing or running
/// [`crate::TreeCotreeGauge`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GaugeError {
    /// The parallel classification threshold must be greater than zero.
    #[error("parallel_threshold must be at least 1 (got {got})")]
    InvalidParallelThreshold {
        /// The invalid threshold supplied by the caller.
        got: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// The mesh or DOF classification violated a precondition.
    #[error("mesh `{mesh}` is invalid: {error}")]
    InvalidInput {
        /// Name of the mesh that was rejected.
        mesh: Arc<str>,
        #[source]
        /// Underlying precondition violation.
        error: InputError,
    },
}

define_error_codes! {
    /// Stable codes describing [`GaugeError`] variants.
    enum GaugeErrorCode for GaugeError {
        /// The parallel classification threshold must be greater than zero.
        InvalidParallelThreshold => InvalidParallelThreshold { .. } => "GAUGE_INVALID_PARALLEL_THRESHOLD",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "GAUGE_BACKEND_UNAVAILABLE",
        /// The mesh or DOF classification violated a precondition.
        InvalidInput => InvalidInput { .. } => "GAUGE_INVALID_INPUT",
    }
}

impl GaugeError {
    /// Retrieve the inner [`InputErrorCode`] when the error is a rejected input.
    pub const fn input_code(&self) -> Option<InputErrorCode> {
        match self {
            Self::InvalidInput { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GaugeError>;
