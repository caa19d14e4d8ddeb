//! Property 3: Determinism.
//!
//! Repeats the gauge on the same input, sequentially and with parallel
//! classification, and requires bit-identical trees and masks every time.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{ExecutionStrategy, GaugeBuilder};

use super::helpers::run_gauge;
use super::types::{DeterminismConfig, GaugeFixture};

/// Runs the determinism property for the given fixture.
pub(super) fn run_determinism_property(fixture: &GaugeFixture) -> TestCaseResult {
    let config = DeterminismConfig::load();
    let baseline = run_gauge(fixture)?;

    let mut strategies = vec![ExecutionStrategy::Sequential];
    #[cfg(feature = "parallel")]
    strategies.push(ExecutionStrategy::Parallel);

    for strategy in strategies {
        let gauge = GaugeBuilder::new()
            .with_execution_strategy(strategy)
            .build()
            .map_err(|e| TestCaseError::fail(format!("builder failed: {e}")))?;
        for run in 0..config.repetitions {
            let result = gauge
                .run_with_map(&fixture.mesh, &fixture.dofs(), &fixture.map)
                .map_err(|e| {
                    TestCaseError::fail(format!(
                        "run {run} ({strategy:?}) failed: {e} ({})",
                        fixture.describe()
                    ))
                })?;
            if result != baseline {
                return Err(TestCaseError::fail(format!(
                    "run {run} ({strategy:?}) diverged from baseline ({})",
                    fixture.describe(),
                )));
            }
        }
    }
    Ok(())
}
