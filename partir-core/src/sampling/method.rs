//! Algorithm selection for the sampling dispatcher.

use std::{fmt, str::FromStr};

use crate::error::PartitionError;

/// Totals below this always use [`Algorithm::BottomUp`] under [`Method::Best`].
pub const BEST_SMALL_TOTAL: usize = 250;

/// A concrete rank-decoding algorithm.
///
/// All four produce exactly uniform samples; they differ only in how many
/// oracle queries they issue per decoded partition.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Algorithm {
    /// Scan column heights upward from 1.
    BottomUp,
    /// Scan column heights downward from the current bound.
    TopDown,
    /// Bisect the column height on the cumulative count.
    DivideAndConquer,
    /// Scan downward and decide each height's multiplicity in one step.
    Multiplicity,
}

impl Algorithm {
    /// Every algorithm, in a stable order.
    pub const ALL: [Self; 4] = [
        Self::BottomUp,
        Self::TopDown,
        Self::DivideAndConquer,
        Self::Multiplicity,
    ];

    /// Canonical snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BottomUp => "bottom_up",
            Self::TopDown => "top_down",
            Self::DivideAndConquer => "divide_and_conquer",
            Self::Multiplicity => "multiplicity",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling method requested by the caller: a fixed algorithm or `Best`.
///
/// # Examples
/// ```
/// use partir_core::{Algorithm, Method};
///
/// let method: Method = "divide-and-conquer".parse()?;
/// assert_eq!(method, Method::Fixed(Algorithm::DivideAndConquer));
/// assert_eq!(Method::Best.resolve(100, 10), Algorithm::BottomUp);
/// assert_eq!(Method::Best.resolve(1_000, 10), Algorithm::DivideAndConquer);
/// # Ok::<(), partir_core::PartitionError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Method {
    /// Always use the given algorithm.
    Fixed(Algorithm),
    /// Pick an algorithm from `(total, parts)`; never affects the distribution.
    #[default]
    Best,
}

impl Method {
    /// Resolves the method to a concrete algorithm for `(total, parts)`.
    ///
    /// `Best` prefers Bottom-Up for small totals or when `parts` is at least
    /// two thirds of `total`, and Divide-and-Conquer otherwise.
    #[must_use]
    pub fn resolve(self, total: usize, parts: usize) -> Algorithm {
        match self {
            Self::Fixed(algorithm) => algorithm,
            Self::Best => {
                if total < BEST_SMALL_TOTAL || parts.saturating_mul(3) >= total.saturating_mul(2) {
                    Algorithm::BottomUp
                } else {
                    Algorithm::DivideAndConquer
                }
            }
        }
    }

    /// Canonical snake-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed(algorithm) => algorithm.as_str(),
            Self::Best => "best",
        }
    }
}

impl From<Algorithm> for Method {
    fn from(algorithm: Algorithm) -> Self {
        Self::Fixed(algorithm)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = PartitionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "bottom_up" => Ok(Self::Fixed(Algorithm::BottomUp)),
            "top_down" => Ok(Self::Fixed(Algorithm::TopDown)),
            "divide_and_conquer" => Ok(Self::Fixed(Algorithm::DivideAndConquer)),
            "multiplicity" => Ok(Self::Fixed(Algorithm::Multiplicity)),
            "best" => Ok(Self::Best),
            _ => Err(PartitionError::UnknownMethod {
                name: raw.to_owned(),
            }),
        }
    }
}

impl FromStr for Algorithm {
    type Err = PartitionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.parse::<Method>()? {
            Method::Fixed(algorithm) => Ok(algorithm),
            Method::Best => Err(PartitionError::UnknownMethod {
                name: raw.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("bottom_up", Method::Fixed(Algorithm::BottomUp))]
    #[case("TOP-DOWN", Method::Fixed(Algorithm::TopDown))]
    #[case(" divide_and_conquer ", Method::Fixed(Algorithm::DivideAndConquer))]
    #[case("multiplicity", Method::Fixed(Algorithm::Multiplicity))]
    #[case("best", Method::Best)]
    fn parses_supported_methods(#[case] raw: &str, #[case] expected: Method) {
        assert_eq!(raw.parse::<Method>(), Ok(expected));
    }

    #[rstest]
    #[case("rejection")]
    #[case("")]
    fn rejects_unknown_methods(#[case] raw: &str) {
        let err = raw.parse::<Method>().expect_err("name is not a method");
        assert_eq!(
            err,
            PartitionError::UnknownMethod {
                name: raw.to_owned()
            }
        );
    }

    #[rstest]
    fn algorithm_rejects_best() {
        assert!("best".parse::<Algorithm>().is_err());
        assert_eq!("multiplicity".parse(), Ok(Algorithm::Multiplicity));
    }

    #[rstest]
    #[case::small_total(249, 10, Algorithm::BottomUp)]
    #[case::dense_parts(900, 600, Algorithm::BottomUp)]
    #[case::just_below_ratio(900, 599, Algorithm::DivideAndConquer)]
    #[case::large_sparse(250, 10, Algorithm::DivideAndConquer)]
    fn best_resolves_by_shape(
        #[case] total: usize,
        #[case] parts: usize,
        #[case] expected: Algorithm,
    ) {
        assert_eq!(Method::Best.resolve(total, parts), expected);
    }

    #[rstest]
    fn names_round_trip_through_display() {
        for algorithm in Algorithm::ALL {
            let method = Method::from(algorithm);
            assert_eq!(method.to_string().parse(), Ok(method));
        }
    }
}
