//! Test run sizing read from the environment.
//!
//! Suites declare their own defaults with [`TestRunProfile::new`] and call
//! [`TestRunProfile::from_env`] so CI can scale every property and
//! distribution suite with the same three variables. Malformed overrides are
//! logged and ignored.

use std::env;

/// Overrides the number of proptest cases per property.
pub const CASES_ENV: &str = "PARTIR_PROPTEST_CASES";
/// Runs proptest cases in forked subprocesses when truthy.
pub const FORK_ENV: &str = "PARTIR_PBT_FORK";
/// Overrides the draws per generator in the distribution suites.
pub const DRAWS_ENV: &str = "PARTIR_STAT_DRAWS";

/// Fewest draws for which the chi-square approximation stays trustworthy on
/// the feasible sets the distribution suites use.
pub const MIN_DRAWS: usize = 1_000;

/// Case count, fork mode and sample size for one test suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestRunProfile {
    cases: u32,
    fork: bool,
    draws: usize,
}

impl TestRunProfile {
    /// Profile with the suite's own defaults and no overrides applied.
    #[must_use]
    pub const fn new(cases: u32, fork: bool, draws: usize) -> Self {
        Self { cases, fork, draws }
    }

    /// Applies overrides from the process environment.
    ///
    /// # Examples
    /// ```
    /// use partir_test_support::ci::run_profile::TestRunProfile;
    ///
    /// let profile = TestRunProfile::new(64, false, 10_000).from_env();
    /// assert!(profile.cases() > 0);
    /// assert!(profile.draws() >= 1_000);
    /// ```
    #[must_use]
    pub fn from_env(self) -> Self {
        self.overlay(|key| env::var(key).ok())
    }

    /// Applies overrides returned by `lookup` for each variable name.
    #[must_use]
    pub fn overlay(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            cases: override_with(&lookup, CASES_ENV, self.cases, parse_cases),
            fork: override_with(&lookup, FORK_ENV, self.fork, parse_switch),
            draws: override_with(&lookup, DRAWS_ENV, self.draws, parse_draws),
        }
    }

    /// Cases per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether proptest forks a subprocess per case.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }

    /// Draws per generator for distribution checks.
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.draws
    }
}

fn override_with<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    current: T,
    parse: fn(&str) -> Result<T, String>,
) -> T {
    let Some(raw) = lookup(key) else {
        return current;
    };
    match parse(raw.trim()) {
        Ok(value) => value,
        Err(reason) => {
            tracing::warn!(env = key, raw = %raw, %reason, "ignoring malformed test run override");
            current
        }
    }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(0) => Err("at least one case is required".to_owned()),
        Ok(cases) => Ok(cases),
        Err(err) => Err(err.to_string()),
    }
}

fn parse_switch(raw: &str) -> Result<bool, String> {
    if ["1", "true", "yes", "on"].iter().any(|word| raw.eq_ignore_ascii_case(word)) {
        Ok(true)
    } else if ["0", "false", "no", "off"].iter().any(|word| raw.eq_ignore_ascii_case(word)) {
        Ok(false)
    } else {
        Err(format!("`{raw}` is not an on/off switch"))
    }
}

fn parse_draws(raw: &str) -> Result<usize, String> {
    let draws = raw.parse::<usize>().map_err(|err| err.to_string())?;
    if draws < MIN_DRAWS {
        return Err(format!("{draws} draws is below the minimum of {MIN_DRAWS}"));
    }
    Ok(draws)
}
