//! Cotree mask construction.

use crate::{dof::DofMask, forest::SpanningForest};

/// Derives the cotree mask from the free mask and the selected tree.
///
/// The free mask is copied and every tree DOF is cleared; nothing else
/// changes. Tree DOFs outside the mask are ignored, so the result is always a
/// subset of `free_mask` and disjoint from the tree.
///
/// # Examples
/// ```
/// use cotree_core::{
///     ClassificationMode, DofMap, DofMask, DofTable, EdgeListMesh, build_spanning_forest,
///     classify_edges, cotree_mask,
/// };
///
/// let mesh = EdgeListMesh::new("square", 4, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
/// let dofs = DofTable::all_free(4);
/// let ordering = classify_edges(&mesh, &dofs, &DofMap::Identity, ClassificationMode::Sequential)?;
/// let forest = build_spanning_forest(4, &ordering);
///
/// let mask = cotree_mask(&DofMask::free_mask(&dofs), &forest);
/// assert_eq!(mask.ones().collect::<Vec<_>>(), vec![3]);
/// # Ok::<(), cotree_core::InputError>(())
/// ```
#[must_use]
pub fn cotree_mask(free_mask: &DofMask, forest: &SpanningForest) -> DofMask {
    let mut mask = free_mask.clone();
    for dof in forest.dofs() {
        mask.clear(dof);
    }
    mask
}
