//! Greedy spanning forest construction over the ordered edge sequence.
//!
//! This is Kruskal's algorithm with the weight sort replaced by the priority
//! order produced by [`crate::classify_edges`]: an edge is accepted iff its
//! endpoints lie in different components at the moment it is tried. The main
//! loop is inherently sequential because every union changes the answer of
//! later finds.

use tracing::debug;

use crate::{
    classify::{ClassifiedEdge, EdgeClass, EdgeOrdering},
    union_find::DisjointSet,
};

/// The tree edges selected for the gauge.
///
/// When the vertex graph is connected this is a spanning tree; otherwise it
/// holds one tree per connected component.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpanningForest {
    edges: Vec<ClassifiedEdge>,
    vertex_count: usize,
    component_count: usize,
}

impl SpanningForest {
    /// Returns the accepted edges in acceptance order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[ClassifiedEdge] { &self.edges }

    /// Returns the number of vertices the forest spans.
    #[must_use]
    #[rustfmt::skip]
    pub fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns the number of connected components in the forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns `true` when the forest spans a single connected component.
    #[must_use]
    pub fn is_tree(&self) -> bool {
        self.component_count == 1
    }

    /// Returns the number of tree edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when no edge was accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterates the DOFs of the tree edges in acceptance order.
    pub fn dofs(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges.iter().map(ClassifiedEdge::dof)
    }

    /// Iterates the mesh edge indices of the tree edges in acceptance order.
    pub fn edge_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges.iter().map(ClassifiedEdge::edge)
    }

    /// Returns the number of accepted edges of the given class.
    #[must_use]
    pub fn count_class(&self, class: EdgeClass) -> usize {
        self.edges.iter().filter(|edge| edge.class() == class).count()
    }
}

/// Builds the spanning forest for `vertex_count` vertices.
///
/// Edges are tried in the order given by `ordering`, so constrained edges win
/// every tie against free edges and earlier mesh edges win within a class.
/// Self-loops and cycle-closing edges are skipped. Once `vertex_count - 1`
/// edges are accepted no further edge can join two components and the scan
/// stops.
///
/// # Panics
/// Panics when an edge endpoint is `>= vertex_count`. Orderings produced by
/// [`crate::classify_edges`] for the same mesh are always in range.
///
/// # Examples
/// ```
/// use cotree_core::{
///     ClassificationMode, DofMap, DofTable, EdgeListMesh, build_spanning_forest, classify_edges,
/// };
///
/// let mesh = EdgeListMesh::new("square", 4, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
/// let ordering = classify_edges(
///     &mesh,
///     &DofTable::all_free(4),
///     &DofMap::Identity,
///     ClassificationMode::Sequential,
/// )?;
/// let forest = build_spanning_forest(4, &ordering);
/// assert_eq!(forest.edge_indices().collect::<Vec<_>>(), vec![0, 1, 2]);
/// assert!(forest.is_tree());
/// # Ok::<(), cotree_core::InputError>(())
/// ```
#[must_use]
pub fn build_spanning_forest(vertex_count: usize, ordering: &EdgeOrdering) -> SpanningForest {
    let mut components = DisjointSet::new(vertex_count);
    let capacity = vertex_count.saturating_sub(1);
    let mut edges = Vec::with_capacity(capacity.min(ordering.len()));

    for edge in ordering.edges() {
        if edges.len() == capacity {
            break;
        }
        if components.union(edge.source(), edge.target()) {
            edges.push(*edge);
        }
    }

    let forest = SpanningForest {
        edges,
        vertex_count,
        component_count: components.components(),
    };
    debug!(
        vertices = vertex_count,
        candidates = ordering.len(),
        tree_edges = forest.len(),
        constrained_accepted = forest.count_class(EdgeClass::Constrained),
        free_accepted = forest.count_class(EdgeClass::Free),
        components = forest.component_count(),
        "built spanning forest"
    );
    forest
}


#[cfg(test)]
mod property;
