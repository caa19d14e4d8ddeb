//! Plot data for inspecting a selected tree.
//!
//! Rendering is left to external tools; this module only resolves tree edges
//! to coordinate pairs.

use crate::{error::InputError, forest::SpanningForest, mesh::VertexCoordinates};

/// A tree edge resolved to the coordinates of its endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeSegment {
    /// Mesh edge index.
    pub edge: usize,
    /// Point of the first endpoint.
    pub start: [f64; 3],
    /// Point of the second endpoint.
    pub end: [f64; 3],
}

/// Resolves every tree edge of `forest` to a line segment.
///
/// # Errors
/// Returns [`InputError::CoordinateCountMismatch`] when `coordinates` does not
/// hold exactly one point per vertex of the forest.
///
/// # Examples
/// ```
/// use cotree_core::{
///     DofTable, EdgeListMesh, GaugeBuilder, VertexCoordinates, tree_segments,
/// };
///
/// let mesh = EdgeListMesh::new("path", 3, vec![(0, 1), (1, 2)]);
/// let gauge = GaugeBuilder::new().build()?;
/// let result = gauge.run(&mesh, &DofTable::all_free(2))?;
///
/// let coords = VertexCoordinates::planar(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
/// let segments = tree_segments(&coords, result.forest())?;
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[1].end, [1.0, 1.0, 0.0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn tree_segments(
    coordinates: &VertexCoordinates,
    forest: &SpanningForest,
) -> Result<Vec<TreeSegment>, InputError> {
    if coordinates.len() != forest.vertex_count() {
        return Err(InputError::CoordinateCountMismatch {
            coordinates: coordinates.len(),
            vertex_count: forest.vertex_count(),
        });
    }

    let points = coordinates.points();
    Ok(forest
        .edges()
        .iter()
        .filter_map(|edge| {
            let start = points.get(edge.source())?;
            let end = points.get(edge.target())?;
            Some(TreeSegment {
                edge: edge.edge(),
                start: *start,
                end: *end,
            })
        })
        .collect())
}
