//! Property-based tests for tree selection.
//!
//! Verifies the forest builder and cotree mask against a brute-force
//! oracle, validates structural invariants (acyclicity, edge count, mask
//! disjointness and containment), and checks that repeated runs and both
//! classification modes yield identical output across generated meshes and
//! DOF classifications.

mod determinism;
mod equivalence;
mod helpers;
mod oracle;
mod strategies;
