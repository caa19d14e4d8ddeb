//! Environment-driven run profiles shared by CI and local test runs.

pub mod property_test_profile;
