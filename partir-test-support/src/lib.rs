//! Shared test utilities used across partir crates.
//!
//! [`tracing`] captures spans and events for instrumentation assertions,
//! [`ci`] reads property-test settings from the environment and [`stats`]
//! scores sampler output against the uniform distribution.

pub mod ci;
pub mod stats;
pub mod tracing;
