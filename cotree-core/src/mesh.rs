//! Mesh abstractions consumed by the gauge.
//!
//! The gauge only needs the vertex count and the ordered list of edge
//! endpoints; everything else about the mesh stays with the caller.

/// Read-only access to the vertex graph of an edge-element mesh.
///
/// Edges are indexed `0..edge_count()` in mesh-native order. That order is the
/// tie-break used when selecting tree edges, so implementations must report a
/// stable order for the duration of a gauge run.
///
/// # Examples
/// ```
/// use cotree_core::EdgeMesh;
///
/// struct Triangle;
///
/// impl EdgeMesh for Triangle {
///     fn name(&self) -> &str { "triangle" }
///     fn vertex_count(&self) -> usize { 3 }
///     fn edge_count(&self) -> usize { 3 }
///     fn edge_vertices(&self, edge: usize) -> Option<(usize, usize)> {
///         [(0, 1), (1, 2), (2, 0)].get(edge).copied()
///     }
/// }
///
/// let mesh = Triangle;
/// assert_eq!(mesh.edge_vertices(2), Some((2, 0)));
/// assert_eq!(mesh.edge_vertices(3), None);
/// assert_eq!(mesh.edges().count(), 3);
/// ```
pub trait EdgeMesh: Sync {
    /// Returns a human-readable name used in diagnostics.
    fn name(&self) -> &str;

    /// Returns the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges.
    fn edge_count(&self) -> usize;

    /// Returns the two vertices incident to `edge`, or `None` when `edge` is
    /// out of range.
    fn edge_vertices(&self, edge: usize) -> Option<(usize, usize)>;

    /// Iterates `(edge, endpoints)` pairs in mesh order, skipping edges the
    /// mesh cannot resolve.
    fn edges(&self) -> impl Iterator<Item = (usize, (usize, usize))> + '_
    where
        Self: Sized,
    {
        (0..self.edge_count()).filter_map(|edge| self.edge_vertices(edge).map(|ends| (edge, ends)))
    }
}

/// Spatial dimension of vertex coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dimension {
    /// Planar meshes; the third component of every point is zero.
    Two,
    /// Volume meshes.
    Three,
}

/// One point per mesh vertex, used only for diagnostics.
///
/// Two-dimensional points are stored with a zero `z` component so consumers
/// can treat both cases uniformly.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexCoordinates {
    dimension: Dimension,
    points: Vec<[f64; 3]>,
}

impl VertexCoordinates {
    /// Builds planar coordinates.
    ///
    /// # Examples
    /// ```
    /// use cotree_core::{Dimension, VertexCoordinates};
    ///
    /// let coords = VertexCoordinates::planar(vec![[0.0, 0.0], [1.0, 0.5]]);
    /// assert_eq!(coords.dimension(), Dimension::Two);
    /// assert_eq!(coords.point(1), Some([1.0, 0.5, 0.0]));
    /// ```
    #[must_use]
    pub fn planar(points: Vec<[f64; 2]>) -> Self {
        Self {
            dimension: Dimension::Two,
            points: points.into_iter().map(|[x, y]| [x, y, 0.0]).collect(),
        }
    }

    /// Builds three-dimensional coordinates.
    #[must_use]
    pub fn spatial(points: Vec<[f64; 3]>) -> Self {
        Self {
            dimension: Dimension::Three,
            points,
        }
    }

    /// Returns the spatial dimension.
    #[must_use]
    #[rustfmt::skip]
    pub fn dimension(&self) -> Dimension { self.dimension }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` when no points are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the point for `vertex`.
    #[must_use]
    pub fn point(&self, vertex: usize) -> Option<[f64; 3]> {
        self.points.get(vertex).copied()
    }

    /// Returns every point in vertex order.
    #[must_use]
    #[rustfmt::skip]
    pub fn points(&self) -> &[[f64; 3]] { &self.points }
}

/// Owned mesh built from an explicit edge list.
///
/// # Examples
/// ```
/// use cotree_core::{EdgeListMesh, EdgeMesh};
///
/// let mesh = EdgeListMesh::new("square", 4, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.edge_count(), 4);
/// assert_eq!(mesh.edge_vertices(3), Some((3, 0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeListMesh {
    name: String,
    vertex_count: usize,
    edges: Vec<(usize, usize)>,
    coordinates: Option<VertexCoordinates>,
}

impl EdgeListMesh {
    /// Creates a mesh from its vertex count and ordered edge list.
    ///
    /// Endpoints are not validated here; the gauge reports out-of-range
    /// vertices when it classifies the edges.
    #[must_use]
    pub fn new(name: impl Into<String>, vertex_count: usize, edges: Vec<(usize, usize)>) -> Self {
        Self {
            name: name.into(),
            vertex_count,
            edges,
            coordinates: None,
        }
    }

    /// Attaches vertex coordinates for diagnostics.
    #[must_use]
    pub fn with_coordinates(mut self, coordinates: VertexCoordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Returns the attached vertex coordinates, if any.
    #[must_use]
    pub fn coordinates(&self) -> Option<&VertexCoordinates> {
        self.coordinates.as_ref()
    }

    /// Returns the raw edge list.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_list(&self) -> &[(usize, usize)] { &self.edges }
}

impl EdgeMesh for EdgeListMesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn edge_vertices(&self, edge: usize) -> Option<(usize, usize)> {
        self.edges.get(edge).copied()
    }
}
