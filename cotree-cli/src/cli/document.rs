//! JSON documents read and written by the CLI.

use std::io::Read;

use cotree_core::{
    Dimension, DofCoupling, DofMap, DofTable, EdgeListMesh, InputError, TreeSegment,
    VertexCoordinates,
};
use serde::{Deserialize, Serialize};

/// Per-DOF coupling as spelled in mesh documents.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CouplingDoc {
    /// Active unknown before gauging.
    Free,
    /// Fixed by a boundary condition or similar constraint.
    Constrained,
    /// Not part of the linear system.
    Unused,
}

impl From<CouplingDoc> for DofCoupling {
    fn from(value: CouplingDoc) -> Self {
        match value {
            CouplingDoc::Free => Self::Free,
            CouplingDoc::Constrained => Self::Constrained,
            CouplingDoc::Unused => Self::Unused,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
enum CoordinatesDoc {
    Planar(Vec<[f64; 2]>),
    Spatial(Vec<[f64; 3]>),
}

/// Mesh and DOF classification loaded from JSON.
///
/// # Examples
/// ```
/// use cotree_cli::cli::MeshDocument;
///
/// let json = r#"{
///     "vertex_count": 3,
///     "edges": [[0, 1], [1, 2], [2, 0]],
///     "dofs": ["free", "constrained", "unused"]
/// }"#;
/// let document = MeshDocument::from_reader(json.as_bytes())?;
/// let (mesh, dofs, _map) = document.into_parts("triangle")?;
/// assert_eq!(mesh.edge_list().len(), 3);
/// assert_eq!(dofs.couplings().len(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MeshDocument {
    /// Number of mesh vertices.
    pub vertex_count: usize,
    /// Vertex pairs, one per edge, in mesh order.
    pub edges: Vec<[usize; 2]>,
    /// Coupling of every DOF.
    pub dofs: Vec<CouplingDoc>,
    /// DOF carried by each edge; edge `i` carries DOF `i` when absent.
    #[serde(default)]
    pub dof_map: Option<Vec<usize>>,
    #[serde(default)]
    coordinates: Option<CoordinatesDoc>,
}

impl MeshDocument {
    /// Parses a document from `reader`.
    ///
    /// # Errors
    /// Returns [`serde_json::Error`] when the input is not a valid document.
    pub fn from_reader(reader: impl Read) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// Returns `true` when the document carries vertex coordinates.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.coordinates.is_some()
    }

    /// Splits the document into the gauge inputs.
    ///
    /// # Errors
    /// Returns [`InputError::DuplicateDof`] when `dof_map` maps two edges to
    /// the same DOF. Every other precondition is checked by the gauge.
    pub fn into_parts(self, name: &str) -> Result<(EdgeListMesh, DofTable, DofMap), InputError> {
        let map = match self.dof_map {
            Some(indices) => DofMap::from_indices(indices)?,
            None => DofMap::Identity,
        };
        let edges = self.edges.into_iter().map(|[u, v]| (u, v)).collect();
        let mut mesh = EdgeListMesh::new(name, self.vertex_count, edges);
        if let Some(coordinates) = self.coordinates {
            mesh = mesh.with_coordinates(match coordinates {
                CoordinatesDoc::Planar(points) => VertexCoordinates::planar(points),
                CoordinatesDoc::Spatial(points) => VertexCoordinates::spatial(points),
            });
        }
        let dofs = self.dofs.into_iter().map(DofCoupling::from).collect();
        Ok((mesh, dofs, map))
    }
}

/// Tree plot written by `--plot`.
///
/// Points and segment endpoints carry two or three components to match the
/// mesh dimension.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PlotDocument {
    /// Spatial dimension, `2` or `3`.
    pub dimension: u8,
    /// Vertex positions.
    pub points: Vec<Vec<f64>>,
    /// Tree edges in acceptance order.
    pub segments: Vec<PlotSegment>,
}

/// A tree edge drawn as a line segment.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PlotSegment {
    /// Mesh edge index.
    pub edge: usize,
    /// First endpoint.
    pub start: Vec<f64>,
    /// Second endpoint.
    pub end: Vec<f64>,
}

impl PlotDocument {
    /// Builds the plot from resolved tree segments.
    #[must_use]
    pub fn new(coordinates: &VertexCoordinates, segments: &[TreeSegment]) -> Self {
        let dimension: u8 = match coordinates.dimension() {
            Dimension::Two => 2,
            Dimension::Three => 3,
        };
        let project = |point: &[f64; 3]| {
            point
                .iter()
                .take(usize::from(dimension))
                .copied()
                .collect()
        };
        Self {
            dimension,
            points: coordinates.points().iter().map(project).collect(),
            segments: segments
                .iter()
                .map(|segment| PlotSegment {
                    edge: segment.edge,
                    start: project(&segment.start),
                    end: project(&segment.end),
                })
                .collect(),
        }
    }
}
