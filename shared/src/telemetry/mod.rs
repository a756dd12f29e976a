//! Telemetry client abstraction.
//!
//! The `TelemetryClient` trait describes the capabilities the emitter needs
//! from a telemetry vendor, allowing different implementations (the Sentry
//! SDK, an in-memory recorder, etc.).

pub mod recording;
pub mod sentry_client;

pub use recording::{RecordedEvent, RecordingClient};
pub use sentry_client::{SentryClient, SentryOptions};

use crate::models::{SampleError, Severity};
use std::time::Duration;

/// Trait for telemetry vendor clients.
///
/// Implementations own whatever buffering and transport the vendor needs;
/// transmission failures are never reported back to the caller.
pub trait TelemetryClient: Send + Sync {
    /// Captures an error event.
    fn capture_error(&self, error: &SampleError);

    /// Starts a trace (transaction) with the given name and operation.
    fn start_trace(&self, name: &str, op: &str) -> Box<dyn TraceHandle>;

    /// Starts a profiling session.
    fn start_profile(&self);

    /// Stops the running profiling session, if any.
    fn stop_profile(&self);

    /// Emits a structured log through the vendor logger.
    fn log(&self, severity: Severity, message: &str);

    /// Waits for buffered telemetry to be sent, up to `timeout`.
    ///
    /// Returns `true` if everything was flushed in time.
    fn flush(&self, timeout: Duration) -> bool;
}

/// An open trace that child spans can be attached to.
pub trait TraceHandle: Send {
    /// Starts a child span under this trace.
    fn start_child(&self, op: &str, description: &str) -> Box<dyn SpanHandle>;

    /// Finishes the trace and hands it to the client for sending.
    fn finish(self: Box<Self>);
}

/// An open child span.
pub trait SpanHandle: Send {
    /// Finishes the span.
    fn finish(self: Box<Self>);
}
