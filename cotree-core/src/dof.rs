//! Degree-of-freedom classification supplied by the finite-element space.
//!
//! The gauge never assembles a space itself. It asks a [`DofClassifier`]
//! whether each edge DOF is unused or free, maps edges to DOFs through a
//! [`DofMap`], and reports its output as a [`DofMask`].

use std::collections::HashMap;

use crate::error::InputError;

/// How a DOF participates in the linear system before gauging.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DofCoupling {
    /// Not part of the system at all, e.g. eliminated by a boundary condition.
    Unused,
    /// Present but not an active unknown. Preferred for tree inclusion.
    Constrained,
    /// An active unknown.
    Free,
}

impl DofCoupling {
    /// Returns the lowercase label used in mesh documents and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unused => "unused",
            Self::Constrained => "constrained",
            Self::Free => "free",
        }
    }
}

/// Per-DOF classification oracle.
///
/// # Examples
/// ```
/// use cotree_core::{DofClassifier, DofCoupling};
///
/// struct AllFree(usize);
///
/// impl DofClassifier for AllFree {
///     fn dof_count(&self) -> usize { self.0 }
///     fn is_unused(&self, _: usize) -> bool { false }
///     fn is_free(&self, _: usize) -> bool { true }
/// }
///
/// let dofs = AllFree(3);
/// assert_eq!(dofs.coupling(1), DofCoupling::Free);
/// ```
pub trait DofClassifier: Sync {
    /// Returns the size of the DOF universe.
    fn dof_count(&self) -> usize;

    /// Returns `true` when `dof` is excluded from the system entirely.
    fn is_unused(&self, dof: usize) -> bool;

    /// Returns `true` when `dof` is an active unknown. Ignored for unused DOFs.
    fn is_free(&self, dof: usize) -> bool;

    /// Resolves both queries into a single [`DofCoupling`].
    fn coupling(&self, dof: usize) -> DofCoupling {
        if self.is_unused(dof) {
            DofCoupling::Unused
        } else if self.is_free(dof) {
            DofCoupling::Free
        } else {
            DofCoupling::Constrained
        }
    }
}

/// Classifier backed by an explicit coupling per DOF.
///
/// Indices past the end of the table are reported as unused.
///
/// # Examples
/// ```
/// use cotree_core::{DofClassifier, DofCoupling, DofTable};
///
/// let table = DofTable::new(vec![DofCoupling::Free, DofCoupling::Unused]);
/// assert!(table.is_free(0));
/// assert!(table.is_unused(1));
/// assert!(table.is_unused(7));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DofTable {
    couplings: Vec<DofCoupling>,
}

impl DofTable {
    /// Wraps a coupling list indexed by DOF.
    #[must_use]
    pub fn new(couplings: Vec<DofCoupling>) -> Self {
        Self { couplings }
    }

    /// Creates `len` DOFs that are all free.
    #[must_use]
    pub fn all_free(len: usize) -> Self {
        Self::new(vec![DofCoupling::Free; len])
    }

    /// Returns the underlying couplings.
    #[must_use]
    #[rustfmt::skip]
    pub fn couplings(&self) -> &[DofCoupling] { &self.couplings }
}

impl FromIterator<DofCoupling> for DofTable {
    fn from_iter<I: IntoIterator<Item = DofCoupling>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl DofClassifier for DofTable {
    fn dof_count(&self) -> usize {
        self.couplings.len()
    }

    fn is_unused(&self, dof: usize) -> bool {
        matches!(
            self.couplings.get(dof),
            None | Some(DofCoupling::Unused)
        )
    }

    fn is_free(&self, dof: usize) -> bool {
        matches!(self.couplings.get(dof), Some(DofCoupling::Free))
    }

    fn coupling(&self, dof: usize) -> DofCoupling {
        self.couplings.get(dof).copied().unwrap_or(DofCoupling::Unused)
    }
}

/// Injective mapping from mesh edge index to DOF index.
///
/// Mesh traversal order and DOF numbering usually coincide, which is what
/// [`DofMap::Identity`] expresses. Spaces that renumber their DOFs supply an
/// explicit table through [`DofMap::from_indices`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DofMap {
    /// Edge `i` carries DOF `i`.
    Identity,
    /// Edge `i` carries DOF `indices[i]`.
    Explicit(DofIndices),
}

/// Per-edge DOF indices of an explicit [`DofMap`].
///
/// Only [`DofMap::from_indices`] builds these outside the crate, so an
/// explicit map always starts out injective.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DofIndices(pub(crate) Vec<usize>);

impl DofIndices {
    /// Returns the DOF index of every edge in mesh order.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[usize] { &self.0 }
}

/// Reports the first edge that reuses a DOF already claimed by an earlier
/// edge. Memory is bounded by the number of entries, not by their values.
fn first_duplicate(indices: &[usize]) -> Option<InputError> {
    let mut owner: HashMap<usize, usize> = HashMap::with_capacity(indices.len());
    for (edge, &dof) in indices.iter().enumerate() {
        if let Some(&first_edge) = owner.get(&dof) {
            return Some(InputError::DuplicateDof {
                dof,
                first_edge,
                second_edge: edge,
            });
        }
        owner.insert(dof, edge);
    }
    None
}

impl DofMap {
    /// Builds an explicit map, rejecting indices that are used twice.
    ///
    /// # Errors
    /// Returns [`InputError::DuplicateDof`] when two edges share a DOF.
    ///
    /// # Examples
    /// ```
    /// use cotree_core::{DofMap, InputError};
    ///
    /// let map = DofMap::from_indices(vec![2, 0, 1])?;
    /// assert_eq!(map.dof_for(0), 2);
    ///
    /// let err = DofMap::from_indices(vec![1, 1]).expect_err("1 is repeated");
    /// assert!(matches!(err, InputError::DuplicateDof { dof: 1, first_edge: 0, second_edge: 1 }));
    /// # Ok::<(), InputError>(())
    /// ```
    pub fn from_indices(indices: Vec<usize>) -> Result<Self, InputError> {
        if let Some(error) = first_duplicate(&indices) {
            return Err(error);
        }
        Ok(Self::Explicit(DofIndices(indices)))
    }

    /// Returns the DOF carried by `edge`.
    ///
    /// For an explicit map an edge past the end maps to `usize::MAX`, which no
    /// classifier can own; the classifier stage rejects it by length first.
    #[must_use]
    pub fn dof_for(&self, edge: usize) -> usize {
        match self {
            Self::Identity => edge,
            Self::Explicit(indices) => indices.0.get(edge).copied().unwrap_or(usize::MAX),
        }
    }

    /// Checks the map against the mesh edge count and the DOF universe.
    ///
    /// # Errors
    /// Returns [`InputError::EdgeCountMismatch`] when the identity map is used
    /// with differing edge and DOF counts,
    /// [`InputError::DofMapLengthMismatch`] when an explicit map does not cover
    /// every edge, [`InputError::DofOutOfRange`] when an explicit entry
    /// falls outside the DOF universe, and [`InputError::DuplicateDof`] when
    /// two edges carry the same DOF.
    pub fn validate(&self, edge_count: usize, dof_count: usize) -> Result<(), InputError> {
        match self {
            Self::Identity => {
                if edge_count != dof_count {
                    return Err(InputError::EdgeCountMismatch {
                        edges: edge_count,
                        dofs: dof_count,
                    });
                }
            }
            Self::Explicit(DofIndices(indices)) => {
                if indices.len() != edge_count {
                    return Err(InputError::DofMapLengthMismatch {
                        map: indices.len(),
                        edges: edge_count,
                    });
                }
                if let Some((edge, &dof)) = indices
                    .iter()
                    .enumerate()
                    .find(|&(_, &dof)| dof >= dof_count)
                {
                    return Err(InputError::DofOutOfRange {
                        edge,
                        dof,
                        dof_count,
                    });
                }
                if let Some(error) = first_duplicate(indices) {
                    return Err(error);
                }
            }
        }
        Ok(())
    }
}

/// Boolean mask over DOF indices.
///
/// # Examples
/// ```
/// use cotree_core::DofMask;
///
/// let mut mask = DofMask::from_bits(vec![true, false, true]);
/// assert_eq!(mask.count_ones(), 2);
/// assert!(mask.clear(0));
/// assert!(!mask.clear(9));
/// assert_eq!(mask.ones().collect::<Vec<_>>(), vec![2]);
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct DofMask {
    bits: Vec<bool>,
}

impl DofMask {
    /// Creates a mask of `len` cleared bits.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// Wraps an existing bit vector.
    #[must_use]
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Builds the free mask of `classifier`.
    ///
    /// A bit is set only for DOFs that are free and not unused, so an unused
    /// DOF is never active regardless of what `is_free` reports for it.
    ///
    /// # Examples
    /// ```
    /// use cotree_core::{DofCoupling, DofMask, DofTable};
    ///
    /// let table = DofTable::new(vec![
    ///     DofCoupling::Free,
    ///     DofCoupling::Constrained,
    ///     DofCoupling::Unused,
    /// ]);
    /// let mask = DofMask::free_mask(&table);
    /// assert_eq!(mask.as_slice(), &[true, false, false]);
    /// ```
    #[must_use]
    pub fn free_mask<C: DofClassifier + ?Sized>(classifier: &C) -> Self {
        (0..classifier.dof_count())
            .map(|dof| classifier.coupling(dof) == DofCoupling::Free)
            .collect()
    }

    /// Returns the number of DOFs covered by the mask.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` when the mask covers no DOFs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the bit for `dof`; out-of-range DOFs read as cleared.
    #[must_use]
    pub fn get(&self, dof: usize) -> bool {
        self.bits.get(dof).copied().unwrap_or(false)
    }

    /// Clears the bit for `dof`. Returns `false` when `dof` is out of range.
    pub fn clear(&mut self, dof: usize) -> bool {
        match self.bits.get_mut(dof) {
            Some(bit) => {
                *bit = false;
                true
            }
            None => false,
        }
    }

    /// Returns the number of set bits.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// Iterates the indices of set bits in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(dof, &bit)| bit.then_some(dof))
    }

    /// Returns `true` when every set bit of `self` is also set in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.ones().all(|dof| other.get(dof))
    }

    /// Returns the bits as a slice.
    #[must_use]
    #[rustfmt::skip]
    pub fn as_slice(&self) -> &[bool] { &self.bits }

    /// Consumes the mask and returns its bits.
    #[must_use]
    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }
}

impl FromIterator<bool> for DofMask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self::from_bits(iter.into_iter().collect())
    }
}
