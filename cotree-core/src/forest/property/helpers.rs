//! Shared helper functions for tree selection property tests.

use proptest::test_runner::TestCaseError;

use crate::{GaugeBuilder, GaugeResult};

use super::types::GaugeFixture;

/// Path-compressing find for union-find verification.
pub(super) fn find_root(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}

/// Runs the gauge with default configuration, converting failures into
/// proptest failures that carry the fixture description.
pub(super) fn run_gauge(fixture: &GaugeFixture) -> Result<GaugeResult, TestCaseError> {
    let gauge = GaugeBuilder::new()
        .build()
        .map_err(|e| TestCaseError::fail(format!("builder failed: {e}")))?;
    gauge
        .run_with_map(&fixture.mesh, &fixture.dofs(), &fixture.map)
        .map_err(|e| TestCaseError::fail(format!("gauge failed: {e} ({})", fixture.describe())))
}
