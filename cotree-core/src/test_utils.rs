//! Shared test utilities for `cotree-core`.

use std::sync::atomic::{AtomicUsize, Ordering};

use cotree_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::dof::{DofClassifier, DofCoupling, DofTable};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `COTREE_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// [`DofClassifier`] that records how often each query is made.
///
/// Used to check that the classifier is consulted exactly once per edge and
/// always with the same index for both questions.
pub(crate) struct CountingClassifier {
    table: DofTable,
    unused_queries: Vec<AtomicUsize>,
    free_queries: Vec<AtomicUsize>,
}

impl CountingClassifier {
    pub(crate) fn new(couplings: Vec<DofCoupling>) -> Self {
        let len = couplings.len();
        Self {
            table: DofTable::new(couplings),
            unused_queries: (0..len).map(|_| AtomicUsize::new(0)).collect(),
            free_queries: (0..len).map(|_| AtomicUsize::new(0)).collect(),
        }
    }

    pub(crate) fn unused_queries(&self, dof: usize) -> usize {
        self.unused_queries[dof].load(Ordering::Relaxed)
    }

    pub(crate) fn free_queries(&self, dof: usize) -> usize {
        self.free_queries[dof].load(Ordering::Relaxed)
    }
}

impl DofClassifier for CountingClassifier {
    fn dof_count(&self) -> usize {
        self.table.dof_count()
    }

    fn is_unused(&self, dof: usize) -> bool {
        if let Some(counter) = self.unused_queries.get(dof) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
        self.table.is_unused(dof)
    }

    fn is_free(&self, dof: usize) -> bool {
        if let Some(counter) = self.free_queries.get(dof) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
        self.table.is_free(dof)
    }
}
