//! Environment-driven knobs shared by CI jobs and local test runs.

pub mod run_profile;
