//! Synthetic triangulated grid meshes.
//!
//! A `side x side` square grid is split into triangles by one diagonal per
//! cell. Edges on the outer boundary carry constrained DOFs, as a Dirichlet
//! condition would produce, and a seeded random fraction of interior edges
//! carries unused DOFs.

use cotree_core::{DofCoupling, DofTable, EdgeListMesh};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors raised while generating a synthetic mesh.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntheticError {
    /// The grid must have at least one cell per side.
    #[error("grid side must be at least 1")]
    ZeroSide,
    /// A probability lies outside `[0, 1]` or is not finite.
    #[error("`{parameter}` must be a finite probability in [0, 1], got {value}")]
    InvalidProbability {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Supplied value.
        value: f64,
    },
}

/// Configuration for [`SyntheticMesh::grid`].
#[derive(Clone, Debug)]
pub struct GridConfig {
    /// Cells per side.
    pub side: usize,
    /// Probability that an interior edge carries an unused DOF.
    pub unused_probability: f64,
    /// Seed for the unused-DOF draw.
    pub seed: u64,
}

/// A generated mesh together with its DOF classification.
#[derive(Clone, Debug)]
pub struct SyntheticMesh {
    /// Triangulated grid, edges in row-major order.
    pub mesh: EdgeListMesh,
    /// One coupling per edge.
    pub dofs: DofTable,
}

impl SyntheticMesh {
    /// Generates a triangulated grid.
    ///
    /// # Errors
    /// Returns [`SyntheticError::ZeroSide`] for an empty grid and
    /// [`SyntheticError::InvalidProbability`] when `unused_probability` is
    /// not a probability.
    ///
    /// # Examples
    /// ```
    /// use cotree_benches::mesh::{GridConfig, SyntheticMesh};
    ///
    /// let grid = SyntheticMesh::grid(&GridConfig {
    ///     side: 2,
    ///     unused_probability: 0.0,
    ///     seed: 7,
    /// })?;
    /// assert_eq!(grid.mesh.edge_list().len(), 16);
    /// # Ok::<(), cotree_benches::mesh::SyntheticError>(())
    /// ```
    pub fn grid(config: &GridConfig) -> Result<Self, SyntheticError> {
        if config.side == 0 {
            return Err(SyntheticError::ZeroSide);
        }
        let probability = config.unused_probability;
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(SyntheticError::InvalidProbability {
                parameter: "unused_probability",
                value: probability,
            });
        }

        let side = config.side;
        let stride = side + 1;
        let id = |row: usize, col: usize| row * stride + col;
        let capacity = 3 * side * side + 2 * side;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut edges = Vec::with_capacity(capacity);
        let mut couplings = Vec::with_capacity(capacity);
        let mut push = |edge: (usize, usize), boundary: bool| {
            edges.push(edge);
            couplings.push(if boundary {
                DofCoupling::Constrained
            } else if rng.gen_bool(probability) {
                DofCoupling::Unused
            } else {
                DofCoupling::Free
            });
        };

        for row in 0..=side {
            for col in 0..=side {
                if col < side {
                    push((id(row, col), id(row, col + 1)), row == 0 || row == side);
                }
                if row < side {
                    push((id(row, col), id(row + 1, col)), col == 0 || col == side);
                }
                if row < side && col < side {
                    push((id(row, col), id(row + 1, col + 1)), false);
                }
            }
        }

        Ok(Self {
            mesh: EdgeListMesh::new(format!("grid-{side}"), stride * stride, edges),
            dofs: DofTable::new(couplings),
        })
    }
}
