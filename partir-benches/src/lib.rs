//! Benchmark support crate for partir.
//!
//! Holds the shapes and labels shared by the Criterion suites so the count
//! oracle and the four generators are measured over the same inputs.

pub mod params;
