//! Sentry-backed telemetry client.
//!
//! Wraps the `sentry` SDK. Transport, buffering and retries all happen inside
//! the SDK; this client only forwards calls.

use super::{SpanHandle, TelemetryClient, TraceHandle};
use crate::models::{SampleError, Severity};
use sentry::types::Dsn;
use sentry::{ClientInitGuard, ClientOptions, Transaction, TransactionContext};
use std::sync::Mutex;
use std::time::Duration;

/// Name of the transaction that brackets a profiling session.
pub const PROFILE_TRANSACTION_NAME: &str = "profile_session";

/// Operation of the transaction that brackets a profiling session.
pub const PROFILE_TRANSACTION_OP: &str = "profile";

/// Options used to initialize the Sentry SDK.
#[derive(Debug, Clone)]
pub struct SentryOptions {
    /// Where events are sent.
    pub dsn: Dsn,
    /// Environment tag attached to every event.
    pub environment: Option<String>,
    /// Release identifier attached to every event.
    pub release: Option<String>,
}

impl SentryOptions {
    fn into_client_options(self) -> ClientOptions {
        ClientOptions {
            dsn: Some(self.dsn),
            environment: self.environment.map(Into::into),
            release: self.release.map(Into::into),
            send_default_pii: true,
            enable_logs: true,
            traces_sample_rate: 1.0,
            ..Default::default()
        }
    }
}

/// Telemetry client backed by the Sentry SDK.
///
/// The SDK is initialized on construction and shut down when the client is
/// dropped. Must be created on the thread that runs the emitter, since the
/// SDK binds its client to the current hub.
pub struct SentryClient {
    _guard: ClientInitGuard,
    profile: Mutex<Option<Transaction>>,
}

impl SentryClient {
    /// Initializes the Sentry SDK.
    #[must_use]
    pub fn init(options: SentryOptions) -> Self {
        let guard = sentry::init(options.into_client_options());

        if guard.is_enabled() {
            tracing::debug!("Sentry client initialized");
        } else {
            tracing::warn!("Sentry client is disabled, events will be dropped");
        }

        Self {
            _guard: guard,
            profile: Mutex::new(None),
        }
    }
}

impl std::fmt::Debug for SentryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentryClient").finish_non_exhaustive()
    }
}

impl TelemetryClient for SentryClient {
    fn capture_error(&self, error: &SampleError) {
        let event_id = sentry::capture_error(error);
        tracing::debug!(%event_id, kind = %error.kind(), "Captured error sample");
    }

    fn start_trace(&self, name: &str, op: &str) -> Box<dyn TraceHandle> {
        let transaction = sentry::start_transaction(TransactionContext::new(name, op));
        Box::new(SentryTrace { transaction })
    }

    fn start_profile(&self) {
        let transaction = sentry::start_transaction(TransactionContext::new(
            PROFILE_TRANSACTION_NAME,
            PROFILE_TRANSACTION_OP,
        ));
        let mut profile = self
            .profile
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(previous) = profile.replace(transaction) {
            tracing::warn!("Profiling session started while another was running");
            previous.finish();
        }
    }

    fn stop_profile(&self) {
        let transaction = self
            .profile
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take();
        match transaction {
            Some(transaction) => transaction.finish(),
            None => tracing::warn!("Profiling session stopped without being started"),
        }
    }

    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => sentry::logger_info!("{}", message),
            Severity::Warning => sentry::logger_warn!("{}", message),
            Severity::Error => sentry::logger_error!("{}", message),
        }
    }

    fn flush(&self, timeout: Duration) -> bool {
        sentry::Hub::current()
            .client()
            .map_or(true, |client| client.flush(Some(timeout)))
    }
}

struct SentryTrace {
    transaction: Transaction,
}

impl TraceHandle for SentryTrace {
    fn start_child(&self, op: &str, description: &str) -> Box<dyn SpanHandle> {
        Box::new(SentrySpan {
            span: self.transaction.start_child(op, description),
        })
    }

    fn finish(self: Box<Self>) {
        self.transaction.finish();
    }
}

struct SentrySpan {
    span: sentry::Span,
}

impl SpanHandle for SentrySpan {
    fn finish(self: Box<Self>) {
        self.span.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_options() -> SentryOptions {
        SentryOptions {
            dsn: "https://public@sentry.example.com/1".parse().unwrap(),
            environment: Some("test".to_string()),
            release: Some("sentry-sampler@0.1.0".to_string()),
        }
    }

    #[test]
    fn test_client_options_enable_everything() {
        let options = test_options().into_client_options();

        assert!(options.dsn.is_some());
        assert!(options.send_default_pii);
        assert!(options.enable_logs);
        assert!((options.traces_sample_rate - 1.0).abs() < f32::EPSILON);
        assert_eq!(options.environment.as_deref(), Some("test"));
        assert_eq!(options.release.as_deref(), Some("sentry-sampler@0.1.0"));
    }

    #[test]
    fn test_client_options_without_environment() {
        let mut options = test_options();
        options.environment = None;
        options.release = None;

        let options = options.into_client_options();
        assert!(options.environment.is_none());
        assert!(options.release.is_none());
    }
}
