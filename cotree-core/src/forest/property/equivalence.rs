//! Property 1: Equivalence with the brute-force reference.
//!
//! The greedy union-find selection must accept exactly the edges the
//! reachability-based reference accepts, in the same order, and produce the
//! same cotree mask.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use super::helpers::run_gauge;
use super::oracle::reference_gauge;
use super::types::GaugeFixture;

/// Runs the oracle equivalence property for the given fixture.
pub(super) fn run_oracle_equivalence_property(fixture: &GaugeFixture) -> TestCaseResult {
    let result = run_gauge(fixture)?;
    let oracle = reference_gauge(
        crate::EdgeMesh::vertex_count(&fixture.mesh),
        fixture.mesh.edge_list(),
        &fixture.edge_dofs,
        &fixture.couplings,
    );

    let tree: Vec<usize> = result.forest().edge_indices().collect();
    if tree != oracle.tree {
        return Err(TestCaseError::fail(format!(
            "tree mismatch: gauge={tree:?}, oracle={:?} ({})",
            oracle.tree,
            fixture.describe(),
        )));
    }

    if result.forest().component_count() != oracle.component_count {
        return Err(TestCaseError::fail(format!(
            "component count mismatch: gauge={}, oracle={} ({})",
            result.forest().component_count(),
            oracle.component_count,
            fixture.describe(),
        )));
    }

    if result.cotree_mask().as_slice() != oracle.cotree.as_slice() {
        return Err(TestCaseError::fail(format!(
            "cotree mask mismatch ({})",
            fixture.describe(),
        )));
    }

    Ok(())
}
