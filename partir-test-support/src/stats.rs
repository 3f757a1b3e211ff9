//! Chi-square statistics for checking sampler uniformity.
//!
//! Critical values use the Wilson–Hilferty cube-root approximation, which is
//! within a few percent of the exact quantile for the degrees of freedom the
//! distribution suites use and errs on the conservative side in the upper
//! tail.

/// Standard normal quantile for an upper-tail probability of `1e-4`.
pub const Z_UPPER_0_0001: f64 = 3.719_016_485_455_709;

/// A chi-square statistic with its degrees of freedom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChiSquare {
    /// Pearson's statistic.
    pub statistic: f64,
    /// Degrees of freedom.
    pub degrees_of_freedom: u32,
}

impl ChiSquare {
    /// Returns `true` when the statistic exceeds the critical value for the
    /// upper-tail normal quantile `z`.
    ///
    /// # Examples
    /// ```
    /// use partir_test_support::stats::{Z_UPPER_0_0001, goodness_of_fit};
    ///
    /// let flat = goodness_of_fit(&[100, 101, 99, 100]);
    /// assert!(!flat.rejects(Z_UPPER_0_0001));
    /// let skewed = goodness_of_fit(&[400, 0, 0, 0]);
    /// assert!(skewed.rejects(Z_UPPER_0_0001));
    /// ```
    #[must_use]
    pub fn rejects(&self, z: f64) -> bool {
        self.statistic > critical_value(self.degrees_of_freedom, z)
    }
}

/// Wilson–Hilferty approximation of the chi-square quantile with
/// `degrees_of_freedom` at upper-tail normal quantile `z`.
#[must_use]
pub fn critical_value(degrees_of_freedom: u32, z: f64) -> f64 {
    if degrees_of_freedom == 0 {
        return 0.0;
    }
    let k = f64::from(degrees_of_freedom);
    let spread = 2.0 / (9.0 * k);
    k * (1.0 - spread + z * spread.sqrt()).powi(3)
}

/// Pearson goodness-of-fit statistic of `observed` against the uniform
/// distribution over its categories.
#[must_use]
pub fn goodness_of_fit(observed: &[u64]) -> ChiSquare {
    let draws: u64 = observed.iter().sum();
    let expected = as_f64(draws) / as_f64(observed.len() as u64);
    let statistic = if expected > 0.0 {
        observed
            .iter()
            .map(|&count| {
                let delta = as_f64(count) - expected;
                delta * delta / expected
            })
            .sum()
    } else {
        0.0
    };
    ChiSquare {
        statistic,
        degrees_of_freedom: degrees(observed.len()),
    }
}

/// Pearson homogeneity statistic for a contingency table with one row per
/// sampler and one column per category.
///
/// Categories no row ever observed are dropped before counting degrees of
/// freedom.
#[must_use]
pub fn homogeneity(table: &[Vec<u64>]) -> ChiSquare {
    let row_totals: Vec<u64> = table.iter().map(|row| row.iter().sum()).collect();
    let width = table.iter().map(Vec::len).max().unwrap_or(0);
    let column_totals: Vec<u64> = (0..width)
        .map(|column| {
            table
                .iter()
                .filter_map(|row| row.get(column))
                .sum::<u64>()
        })
        .collect();
    let grand_total = as_f64(row_totals.iter().sum());

    let mut statistic = 0.0;
    for (row, &row_total) in table.iter().zip(&row_totals) {
        for (column, &column_total) in column_totals.iter().enumerate() {
            if column_total == 0 {
                continue;
            }
            let expected = as_f64(row_total) * as_f64(column_total) / grand_total;
            let observed = as_f64(row.get(column).copied().unwrap_or(0));
            let delta = observed - expected;
            statistic += delta * delta / expected;
        }
    }

    let occupied = column_totals.iter().filter(|&&total| total > 0).count();
    ChiSquare {
        statistic,
        degrees_of_freedom: degrees(table.len()).saturating_mul(degrees(occupied)),
    }
}

// Draw counts stay far below 2^52, so the conversion is exact.
fn as_f64(value: u64) -> f64 {
    value as f64
}

fn degrees(categories: usize) -> u32 {
    u32::try_from(categories.saturating_sub(1)).unwrap_or(u32::MAX)
}
