//! Emitter configuration.
//!
//! Holds the settings that drive the emitter loop and the Sentry client, and
//! validates them before anything is sent.

use sentry::types::{Dsn, ParseDsnError};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the Sentry DSN.
pub const DSN_ENV: &str = "SENTRY_DSN";

/// Default delay between ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Default bound on the shutdown flush.
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(2);

/// Number of DSN characters shown in the startup banner.
const DSN_PREVIEW_CHARS: usize = 50;

/// Errors that can occur while building the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No DSN was provided.
    #[error("SENTRY_DSN environment variable is not set; set it in your environment or a .env file")]
    MissingDsn,

    /// The DSN could not be parsed.
    #[error("invalid SENTRY_DSN: {0}")]
    InvalidDsn(#[from] ParseDsnError),

    /// The inter-tick interval was zero.
    #[error("tick interval must be greater than zero")]
    ZeroInterval,
}

/// Emitter configuration.
///
/// # Example
///
/// ```
/// use shared::config::EmitterConfig;
/// use std::time::Duration;
///
/// let config = EmitterConfig::new("https://public@sentry.example.com/1")
///     .unwrap()
///     .with_max_iterations(5);
///
/// assert_eq!(config.interval, Duration::from_secs(1));
/// assert_eq!(config.flush_timeout, Duration::from_secs(2));
/// assert_eq!(config.max_iterations, Some(5));
/// ```
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    /// The raw DSN text, as provided.
    pub dsn: String,
    /// Environment tag attached to events.
    pub environment: Option<String>,
    /// Delay between ticks.
    pub interval: Duration,
    /// Bound on the shutdown flush.
    pub flush_timeout: Duration,
    /// Stop after this many ticks; `None` runs until interrupted.
    pub max_iterations: Option<u64>,
    parsed_dsn: Dsn,
}

impl EmitterConfig {
    /// Creates a configuration with default timings for the given DSN.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the DSN is empty or whitespace
    /// - the DSN cannot be parsed
    pub fn new(dsn: impl Into<String>) -> Result<Self, ConfigError> {
        let dsn = dsn.into();
        let trimmed = dsn.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingDsn);
        }
        let parsed_dsn = trimmed.parse::<Dsn>()?;

        Ok(Self {
            dsn,
            environment: None,
            interval: DEFAULT_INTERVAL,
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
            max_iterations: None,
            parsed_dsn,
        })
    }

    /// Creates a configuration from an optional DSN, as read from the
    /// environment or the command line.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDsn`] if `dsn` is `None`, otherwise the
    /// same errors as [`EmitterConfig::new`].
    pub fn from_optional_dsn(dsn: Option<String>) -> Result<Self, ConfigError> {
        dsn.map_or(Err(ConfigError::MissingDsn), Self::new)
    }

    /// Sets the environment tag.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Sets the delay between ticks.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the bound on the shutdown flush.
    #[must_use]
    pub fn with_flush_timeout(mut self, flush_timeout: Duration) -> Self {
        self.flush_timeout = flush_timeout;
        self
    }

    /// Stops the emitter after `iterations` ticks.
    #[must_use]
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Validates the timing settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    /// Returns the parsed DSN.
    #[must_use]
    pub fn parsed_dsn(&self) -> &Dsn {
        &self.parsed_dsn
    }

    /// Returns the DSN cut to its first 50 characters, for display.
    #[must_use]
    pub fn dsn_preview(&self) -> String {
        self.dsn.chars().take(DSN_PREVIEW_CHARS).collect()
    }
}
