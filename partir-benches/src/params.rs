//! Benchmark parameter types.

use std::fmt;

use partir_core::Algorithm;

/// A `(total, parts)` feasible-set shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ShapeParams {
    /// Total the parts sum to.
    pub total: usize,
    /// Number of parts.
    pub parts: usize,
}

impl ShapeParams {
    /// Creates a shape.
    #[must_use]
    pub const fn new(total: usize, parts: usize) -> Self {
        Self { total, parts }
    }
}

impl fmt::Display for ShapeParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q={},N={}", self.total, self.parts)
    }
}

/// Shapes sampled by the generator suite: a few parts, a middling ratio, and
/// the dense regime where most parts are small.
pub const SAMPLING_SHAPES: &[ShapeParams] = &[
    ShapeParams::new(500, 10),
    ShapeParams::new(500, 100),
    ShapeParams::new(500, 400),
];

/// Shapes whose counts the oracle suite computes from a cold cache.
pub const COUNT_SHAPES: &[ShapeParams] = &[
    ShapeParams::new(250, 25),
    ShapeParams::new(1_000, 50),
    ShapeParams::new(2_000, 100),
];

/// Parameters for one generator benchmark.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GeneratorBenchParams {
    /// Feasible-set shape.
    pub shape: ShapeParams,
    /// Generator under test.
    pub algorithm: Algorithm,
}

impl fmt::Display for GeneratorBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.algorithm, self.shape)
    }
}
