//! Diagnostics for the `partir` binary.
//!
//! Everything goes to `stderr` so partitions printed on `stdout` stay
//! machine-readable. The level comes from `RUST_LOG` (default `info`) and the
//! format from `--log-format` or `PARTIR_LOG_FORMAT` (default `human`).
//! Crates logging through the `log` facade are forwarded into `tracing`.

use std::{env, fmt, str::FromStr, sync::OnceLock};

use clap::ValueEnum;
use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Environment variable selecting `human` or `json` output.
pub const LOG_FORMAT_ENV: &str = "PARTIR_LOG_FORMAT";

const DEFAULT_DIRECTIVES: &str = "info";

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Rendering of log lines.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    /// Plain text for terminals.
    #[default]
    Human,
    /// One JSON object per line with the enclosing spans attached.
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("human") {
            Ok(Self::Human)
        } else if trimmed.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(LoggingError::UnsupportedFormat {
                provided: trimmed.to_owned(),
            })
        }
    }
}

/// Failures while configuring diagnostics.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// A logging variable was set to bytes that are not UTF-8.
    #[error("environment variable `{name}` is not valid UTF-8")]
    InvalidUnicode {
        /// Variable name.
        name: &'static str,
    },
    /// `PARTIR_LOG_FORMAT` named something other than `human` or `json`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Trimmed value supplied by the user.
        provided: String,
    },
    /// `RUST_LOG` could not be parsed as filter directives.
    #[error("invalid `RUST_LOG` directives: {source}")]
    InvalidFilter {
        /// Parser failure from `tracing_subscriber`.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
}

/// Resolved logging settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogConfig {
    /// Output rendering.
    pub format: LogFormat,
    /// `EnvFilter` directives.
    pub directives: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            directives: DEFAULT_DIRECTIVES.to_owned(),
        }
    }
}

impl LogConfig {
    /// Reads `PARTIR_LOG_FORMAT` and `RUST_LOG`.
    ///
    /// # Errors
    /// Returns [`LoggingError`] when either variable is not UTF-8 or the
    /// format is unsupported.
    pub fn from_env() -> Result<Self, LoggingError> {
        Self::from_lookup(env::var)
    }

    fn from_lookup(
        lookup: impl Fn(&'static str) -> Result<String, env::VarError>,
    ) -> Result<Self, LoggingError> {
        let mut config = Self::default();
        if let Some(raw) = read(&lookup, LOG_FORMAT_ENV)? {
            config.format = raw.parse()?;
        }
        if let Some(raw) = read(&lookup, EnvFilter::DEFAULT_ENV)? {
            config.directives = raw;
        }
        Ok(config)
    }

    /// Replaces the format when `format` is set.
    #[must_use]
    pub fn with_format(mut self, format: Option<LogFormat>) -> Self {
        if let Some(format) = format {
            self.format = format;
        }
        self
    }
}

fn read(
    lookup: &impl Fn(&'static str) -> Result<String, env::VarError>,
    name: &'static str,
) -> Result<Option<String>, LoggingError> {
    match lookup(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => Ok(Some(raw)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(LoggingError::InvalidUnicode { name }),
    }
}

/// Installs the global subscriber described by `config`.
///
/// Later calls are no-ops. If another subscriber already owns the global
/// slot, the conflict is reported on `stderr` and the existing subscriber
/// is left in place.
///
/// # Errors
/// Returns [`LoggingError::InvalidFilter`] when the directives do not parse.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.directives)
        .map_err(|source| LoggingError::InvalidFilter { source })?;
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE);
    let layer = match config.format {
        LogFormat::Human => layer.boxed(),
        LogFormat::Json => layer.json().with_current_span(true).with_span_list(true).boxed(),
    };

    // Fails only when another `log` logger is registered, which is harmless.
    let _ = LogTracer::init();

    if let Err(err) = tracing_subscriber::registry().with(filter).with(layer).try_init() {
        warn_existing_subscriber(&err);
    }
    let _ = INSTALLED.set(());
    Ok(())
}

fn warn_existing_subscriber(err: &tracing_subscriber::util::TryInitError) {
    report_unlogged(format_args!("keeping the existing tracing subscriber: {err}"));
}

/// Writes `message` to `stderr` when no tracing subscriber can carry it.
#[expect(
    clippy::print_stderr,
    reason = "tracing is unavailable while the subscriber is being installed"
)]
pub fn report_unlogged(message: impl fmt::Display) {
    eprintln!("{}", unlogged_line(message));
}

fn unlogged_line(message: impl fmt::Display) -> String {
    format!("partir: {message}")
}
