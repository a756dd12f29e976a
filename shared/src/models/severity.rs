//! Log severity model for log samples.

use rand::seq::SliceRandom;
use rand::Rng;

/// Severity of a log sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Informational messages.
    #[default]
    Info,
    /// Warning conditions.
    Warning,
    /// Error conditions.
    Error,
}

impl Severity {
    /// Every severity a log sample can be emitted at.
    pub const ALL: [Severity; 3] = [Self::Info, Self::Warning, Self::Error];

    /// Picks a severity uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&Self::Info)
    }

    /// Returns the capitalized label used as the message prefix.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }

    /// Builds the log message for the given iteration.
    ///
    /// # Example
    ///
    /// ```
    /// use shared::models::Severity;
    ///
    /// assert_eq!(Severity::Warning.message(3), "Warning log sample 3");
    /// ```
    #[must_use]
    pub fn message(self, iteration: u64) -> String {
        format!("{} log sample {iteration}", self.label())
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A log line emitted by a single log sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// The severity the record was emitted at.
    pub severity: Severity,
    /// The message text.
    pub message: String,
}

impl LogRecord {
    /// Creates the record for the given severity and iteration.
    #[must_use]
    pub fn new(severity: Severity, iteration: u64) -> Self {
        Self {
            severity,
            message: severity.message(iteration),
        }
    }

    /// Writes the record to the local `tracing` logger.
    pub fn emit_local(&self) {
        match self.severity {
            Severity::Info => tracing::info!("{}", self.message),
            Severity::Warning => tracing::warn!("{}", self.message),
            Severity::Error => tracing::error!("{}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::capture_local_logs;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn capture_local(record: &LogRecord) -> String {
        capture_local_logs(|| record.emit_local()).1
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Info.to_string(), "info");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Error.to_string(), "error");
    }

    #[test]
    fn test_message_includes_iteration() {
        assert_eq!(Severity::Info.message(1), "Info log sample 1");
        assert_eq!(Severity::Error.message(42), "Error log sample 42");
    }

    #[test]
    fn test_random_covers_all_severities() {
        let mut rng = StdRng::seed_from_u64(11);
        let seen: HashSet<Severity> = (0..100).map(|_| Severity::random(&mut rng)).collect();
        assert_eq!(seen.len(), Severity::ALL.len());
    }

    #[test]
    fn test_emit_local_uses_matching_level() {
        let output = capture_local(&LogRecord::new(Severity::Warning, 7));
        assert!(output.contains("WARN"));
        assert!(output.contains("Warning log sample 7"));

        let output = capture_local(&LogRecord::new(Severity::Error, 8));
        assert!(output.contains("ERROR"));
        assert!(output.contains("Error log sample 8"));

        let output = capture_local(&LogRecord::new(Severity::Info, 9));
        assert!(output.contains("INFO"));
        assert!(output.contains("Info log sample 9"));
    }
}
