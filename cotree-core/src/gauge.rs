//! Tree–cotree gauge orchestration.
//!
//! [`TreeCotreeGauge`] runs the three stages (classification, spanning forest,
//! cotree mask) against a snapshot of the mesh and DOF classification and
//! returns the result only once every stage has succeeded.

use std::{num::NonZeroUsize, sync::Arc};

use tracing::{info, instrument, warn};

use crate::{
    Result,
    classify::{ClassificationMode, classify_edges},
    dof::{DofClassifier, DofMap, DofMask},
    error::GaugeError,
    forest::{SpanningForest, build_spanning_forest},
    mask::cotree_mask,
    mesh::EdgeMesh,
};

/// Edge count at which [`ExecutionStrategy::Auto`] starts classifying in
/// parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 65_536;

/// Indicates how [`TreeCotreeGauge`] runs the per-edge classification pass.
///
/// Only classification is ever parallel; the spanning forest is always built
/// sequentially. Every strategy yields the same result.
///
/// # Examples
/// ```
/// use cotree_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Classify in parallel for large meshes when the `parallel` feature is
    /// enabled, sequentially otherwise.
    Auto,
    /// Always classify on the calling thread.
    Sequential,
    /// Always classify in parallel. Requires the `parallel` feature.
    Parallel,
}

/// Configures and constructs [`TreeCotreeGauge`] instances.
///
/// # Examples
/// ```
/// use cotree_core::{ExecutionStrategy, GaugeBuilder};
///
/// let gauge = GaugeBuilder::new()
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .with_parallel_threshold(1_024)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(gauge.execution_strategy(), ExecutionStrategy::Sequential);
/// assert_eq!(gauge.parallel_threshold().get(), 1_024);
/// ```
#[derive(Debug, Clone)]
pub struct GaugeBuilder {
    execution_strategy: ExecutionStrategy,
    parallel_threshold: usize,
}

impl Default for GaugeBuilder {
    fn default() -> Self {
        Self {
            execution_strategy: ExecutionStrategy::Auto,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl GaugeBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the execution strategy used for classification.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Overrides the edge count at which `Auto` switches to parallel
    /// classification.
    #[must_use]
    pub fn with_parallel_threshold(mut self, edges: usize) -> Self {
        self.parallel_threshold = edges;
        self
    }

    /// Returns the configured parallel threshold.
    #[must_use]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Validates the configuration and constructs a [`TreeCotreeGauge`].
    ///
    /// # Errors
    /// Returns [`GaugeError::InvalidParallelThreshold`] when the threshold is
    /// zero and [`GaugeError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested without the `parallel`
    /// feature.
    ///
    /// # Examples
    /// ```
    /// use cotree_core::{GaugeBuilder, GaugeError};
    ///
    /// let err = GaugeBuilder::new()
    ///     .with_parallel_threshold(0)
    ///     .build()
    ///     .expect_err("zero threshold is rejected");
    /// assert!(matches!(err, GaugeError::InvalidParallelThreshold { got: 0 }));
    /// ```
    pub fn build(self) -> Result<TreeCotreeGauge> {
        let parallel_threshold = NonZeroUsize::new(self.parallel_threshold).ok_or(
            GaugeError::InvalidParallelThreshold {
                got: self.parallel_threshold,
            },
        )?;

        #[cfg(not(feature = "parallel"))]
        if self.execution_strategy == ExecutionStrategy::Parallel {
            return Err(GaugeError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            });
        }

        Ok(TreeCotreeGauge {
            execution_strategy: self.execution_strategy,
            parallel_threshold,
        })
    }
}

/// Output of a gauge run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GaugeResult {
    forest: SpanningForest,
    free_mask: DofMask,
    cotree_mask: DofMask,
    unused_count: usize,
}

impl GaugeResult {
    /// Returns the selected tree edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn forest(&self) -> &SpanningForest { &self.forest }

    /// Returns the free mask the cotree was derived from.
    #[must_use]
    #[rustfmt::skip]
    pub fn free_mask(&self) -> &DofMask { &self.free_mask }

    /// Returns the cotree mask: set bits are the active unknowns after gauging.
    #[must_use]
    #[rustfmt::skip]
    pub fn cotree_mask(&self) -> &DofMask { &self.cotree_mask }

    /// Returns the number of mesh edges skipped because their DOF is unused.
    #[must_use]
    #[rustfmt::skip]
    pub fn unused_count(&self) -> usize { self.unused_count }

    /// Splits the result into the forest and the cotree mask.
    #[must_use]
    pub fn into_parts(self) -> (SpanningForest, DofMask) {
        (self.forest, self.cotree_mask)
    }
}

/// Entry point for computing tree–cotree gauges.
///
/// # Examples
/// ```
/// use cotree_core::{DofCoupling, DofTable, EdgeListMesh, GaugeBuilder};
///
/// let mesh = EdgeListMesh::new("square", 4, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
/// let dofs = DofTable::new(vec![
///     DofCoupling::Free,
///     DofCoupling::Free,
///     DofCoupling::Free,
///     DofCoupling::Constrained,
/// ]);
///
/// let gauge = GaugeBuilder::new().build().expect("builder must succeed");
/// let result = gauge.run(&mesh, &dofs).expect("run must succeed");
/// assert_eq!(result.forest().edge_indices().collect::<Vec<_>>(), vec![3, 0, 1]);
/// assert_eq!(result.cotree_mask().ones().collect::<Vec<_>>(), vec![2]);
/// ```
#[derive(Debug, Clone)]
pub struct TreeCotreeGauge {
    execution_strategy: ExecutionStrategy,
    parallel_threshold: NonZeroUsize,
}

impl TreeCotreeGauge {
    /// Returns the execution strategy that will be used when running.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Returns the edge count at which `Auto` classifies in parallel.
    #[must_use]
    pub fn parallel_threshold(&self) -> NonZeroUsize {
        self.parallel_threshold
    }

    /// Computes the gauge with edge `i` carrying DOF `i`.
    ///
    /// # Errors
    /// Returns [`GaugeError::InvalidInput`] when the mesh is empty, the edge
    /// count differs from the DOF count, or an edge references a vertex
    /// outside the mesh.
    pub fn run<M, C>(&self, mesh: &M, classifier: &C) -> Result<GaugeResult>
    where
        M: EdgeMesh + ?Sized,
        C: DofClassifier + ?Sized,
    {
        self.run_with_map(mesh, classifier, &DofMap::Identity)
    }

    /// Computes the gauge with an explicit edge-to-DOF map.
    ///
    /// # Errors
    /// Returns [`GaugeError::InvalidInput`] for any precondition violation
    /// listed on [`crate::classify_edges`].
    #[instrument(
        name = "core.run",
        err,
        skip(self, mesh, classifier, map),
        fields(
            mesh = %mesh.name(),
            vertices = mesh.vertex_count(),
            edges = mesh.edge_count(),
            dofs = classifier.dof_count(),
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn run_with_map<M, C>(&self, mesh: &M, classifier: &C, map: &DofMap) -> Result<GaugeResult>
    where
        M: EdgeMesh + ?Sized,
        C: DofClassifier + ?Sized,
    {
        let mode = self.classification_mode(mesh.edge_count());
        let ordering = classify_edges(mesh, classifier, map, mode).map_err(|error| {
            GaugeError::InvalidInput {
                mesh: Arc::from(mesh.name()),
                error,
            }
        })?;

        let forest = build_spanning_forest(mesh.vertex_count(), &ordering);
        let free_mask = DofMask::free_mask(classifier);
        let cotree = cotree_mask(&free_mask, &forest);

        if !forest.is_tree() {
            warn!(
                mesh = mesh.name(),
                components = forest.component_count(),
                "vertex graph is disconnected; gauge holds one tree per component"
            );
        }
        info!(
            tree_edges = forest.len(),
            cotree_dofs = cotree.count_ones(),
            components = forest.component_count(),
            "gauge computed"
        );

        Ok(GaugeResult {
            forest,
            free_mask,
            cotree_mask: cotree,
            unused_count: ordering.unused_count(),
        })
    }

    #[cfg_attr(
        not(feature = "parallel"),
        expect(unused_variables, reason = "edge count only selects parallel classification")
    )]
    fn classification_mode(&self, edge_count: usize) -> ClassificationMode {
        match self.execution_strategy {
            ExecutionStrategy::Sequential => ClassificationMode::Sequential,
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => ClassificationMode::Parallel,
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Auto if edge_count >= self.parallel_threshold.get() => {
                ClassificationMode::Parallel
            }
            // `build` rejects `Parallel` when the feature is off.
            _ => ClassificationMode::Sequential,
        }
    }
}
