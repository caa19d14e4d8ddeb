//! Edge classification and priority ordering.
//!
//! Every mesh edge is resolved to its DOF and coupling. Unused edges are
//! dropped; the rest are split into a constrained bucket followed by a free
//! bucket, each keeping mesh order. Trying constrained edges first leaves as
//! many free edges as possible outside the tree.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::{
    dof::{DofClassifier, DofCoupling, DofMap},
    error::InputError,
    mesh::EdgeMesh,
};

/// Priority class of an edge that takes part in tree construction.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EdgeClass {
    /// Carries a non-free DOF; tried first.
    Constrained,
    /// Carries a free DOF; tried after every constrained edge.
    Free,
}

/// A mesh edge resolved to its DOF and priority class.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ClassifiedEdge {
    edge: usize,
    dof: usize,
    source: usize,
    target: usize,
    class: EdgeClass,
}

impl ClassifiedEdge {
    /// Creates a classified edge.
    #[must_use]
    pub const fn new(edge: usize, dof: usize, source: usize, target: usize, class: EdgeClass) -> Self {
        Self {
            edge,
            dof,
            source,
            target,
            class,
        }
    }

    /// Returns the mesh edge index.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge(&self) -> usize { self.edge }

    /// Returns the DOF carried by the edge.
    #[must_use]
    #[rustfmt::skip]
    pub fn dof(&self) -> usize { self.dof }

    /// Returns the first endpoint as listed by the mesh.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// Returns the second endpoint as listed by the mesh.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> usize { self.target }

    /// Returns the priority class.
    #[must_use]
    #[rustfmt::skip]
    pub fn class(&self) -> EdgeClass { self.class }
}

/// Whether the per-edge classification pass may use worker threads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClassificationMode {
    /// Classify on the calling thread.
    Sequential,
    /// Classify with Rayon; results are still collected in mesh order.
    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    Parallel,
}

/// Edges in the order the spanning forest builder must try them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EdgeOrdering {
    edges: Vec<ClassifiedEdge>,
    constrained: usize,
    unused: usize,
}

impl EdgeOrdering {
    /// Returns all participating edges: constrained first, then free.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[ClassifiedEdge] { &self.edges }

    /// Returns the constrained bucket in mesh order.
    #[must_use]
    pub fn constrained(&self) -> &[ClassifiedEdge] {
        self.edges.get(..self.constrained).unwrap_or_default()
    }

    /// Returns the free bucket in mesh order.
    #[must_use]
    pub fn free(&self) -> &[ClassifiedEdge] {
        self.edges.get(self.constrained..).unwrap_or_default()
    }

    /// Returns the number of edges dropped because their DOF is unused.
    #[must_use]
    #[rustfmt::skip]
    pub fn unused_count(&self) -> usize { self.unused }

    /// Returns the number of participating edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when no edge participates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns the mesh edge indices in processing order.
    pub fn edge_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges.iter().map(ClassifiedEdge::edge)
    }

    /// Stable two-bucket partition of classified edges.
    ///
    /// `None` entries stand for unused edges and are counted but dropped.
    fn partition(resolved: Vec<Option<ClassifiedEdge>>) -> Self {
        let mut constrained = Vec::new();
        let mut free = Vec::new();
        let mut unused = 0_usize;
        for entry in resolved {
            match entry {
                None => unused = unused.saturating_add(1),
                Some(edge) => match edge.class {
                    EdgeClass::Constrained => constrained.push(edge),
                    EdgeClass::Free => free.push(edge),
                },
            }
        }

        let split = constrained.len();
        constrained.extend(free);
        Self {
            edges: constrained,
            constrained: split,
            unused,
        }
    }
}

/// Classifies every mesh edge and orders the participating ones.
///
/// # Errors
/// Returns [`InputError::EmptyMesh`] when the mesh has no vertices, any error
/// from [`DofMap::validate`], [`InputError::MissingEdge`] when the mesh cannot
/// resolve an edge below its own edge count, and
/// [`InputError::VertexOutOfRange`] for endpoints outside the mesh.
///
/// # Examples
/// ```
/// use cotree_core::{
///     ClassificationMode, DofCoupling, DofMap, DofTable, EdgeListMesh, classify_edges,
/// };
///
/// let mesh = EdgeListMesh::new("square", 4, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
/// let dofs = DofTable::new(vec![
///     DofCoupling::Free,
///     DofCoupling::Free,
///     DofCoupling::Free,
///     DofCoupling::Constrained,
/// ]);
/// let ordering = classify_edges(&mesh, &dofs, &DofMap::Identity, ClassificationMode::Sequential)?;
/// assert_eq!(ordering.edge_indices().collect::<Vec<_>>(), vec![3, 0, 1, 2]);
/// # Ok::<(), cotree_core::InputError>(())
/// ```
pub fn classify_edges<M, C>(
    mesh: &M,
    classifier: &C,
    map: &DofMap,
    mode: ClassificationMode,
) -> Result<EdgeOrdering, InputError>
where
    M: EdgeMesh + ?Sized,
    C: DofClassifier + ?Sized,
{
    let vertex_count = mesh.vertex_count();
    if vertex_count == 0 {
        return Err(InputError::EmptyMesh);
    }

    let edge_count = mesh.edge_count();
    map.validate(edge_count, classifier.dof_count())?;

    let classify = |edge: usize| classify_edge(mesh, classifier, map, edge, edge_count, vertex_count);
    let resolved: Vec<Option<ClassifiedEdge>> = match mode {
        ClassificationMode::Sequential => (0..edge_count).map(classify).collect::<Result<_, _>>()?,
        #[cfg(feature = "parallel")]
        ClassificationMode::Parallel => (0..edge_count)
            .into_par_iter()
            .map(classify)
            .collect::<Result<_, _>>()?,
    };

    let ordering = EdgeOrdering::partition(resolved);
    debug!(
        mesh = mesh.name(),
        edges = edge_count,
        constrained = ordering.constrained().len(),
        free = ordering.free().len(),
        unused = ordering.unused_count(),
        ?mode,
        "classified mesh edges"
    );
    Ok(ordering)
}

fn classify_edge<M, C>(
    mesh: &M,
    classifier: &C,
    map: &DofMap,
    edge: usize,
    edge_count: usize,
    vertex_count: usize,
) -> Result<Option<ClassifiedEdge>, InputError>
where
    M: EdgeMesh + ?Sized,
    C: DofClassifier + ?Sized,
{
    let (source, target) = mesh
        .edge_vertices(edge)
        .ok_or(InputError::MissingEdge { edge, edge_count })?;
    for vertex in [source, target] {
        if vertex >= vertex_count {
            return Err(InputError::VertexOutOfRange {
                edge,
                vertex,
                vertex_count,
            });
        }
    }

    let dof = map.dof_for(edge);
    let class = match classifier.coupling(dof) {
        DofCoupling::Unused => return Ok(None),
        DofCoupling::Constrained => EdgeClass::Constrained,
        DofCoupling::Free => EdgeClass::Free,
    };
    Ok(Some(ClassifiedEdge::new(edge, dof, source, target, class)))
}
