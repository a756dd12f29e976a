//! In-memory telemetry client.
//!
//! Records every call in order instead of sending anything, which makes the
//! output of a tick easy to inspect.

use super::{SpanHandle, TelemetryClient, TraceHandle};
use crate::models::{FaultKind, SampleError, Severity};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A single call observed by a [`RecordingClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedEvent {
    /// An error was captured.
    Error {
        /// Kind of the captured error.
        kind: FaultKind,
        /// Display text of the captured error.
        message: String,
    },
    /// A trace was started.
    TraceStarted {
        /// Transaction name.
        name: String,
        /// Transaction operation.
        op: String,
    },
    /// A child span was started.
    SpanStarted {
        /// Span operation.
        op: String,
        /// Span description.
        description: String,
    },
    /// A child span was finished.
    SpanFinished {
        /// Span operation.
        op: String,
    },
    /// A trace was finished.
    TraceFinished {
        /// Transaction name.
        name: String,
    },
    /// A profiling session was started.
    ProfileStarted,
    /// A profiling session was stopped.
    ProfileStopped,
    /// A structured log was emitted.
    Log {
        /// Log severity.
        severity: Severity,
        /// Log message.
        message: String,
    },
    /// A flush was requested.
    Flush {
        /// The flush bound.
        timeout: Duration,
    },
}

type EventLog = Arc<Mutex<Vec<RecordedEvent>>>;

fn record(events: &EventLog, event: RecordedEvent) {
    let mut events = events
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    events.push(event);
}

/// Telemetry client that records calls in memory.
///
/// # Example
///
/// ```
/// use shared::models::Severity;
/// use shared::telemetry::{RecordedEvent, RecordingClient, TelemetryClient};
///
/// let client = RecordingClient::new();
/// client.log(Severity::Info, "Info log sample 1");
///
/// assert_eq!(
///     client.events(),
///     vec![RecordedEvent::Log {
///         severity: Severity::Info,
///         message: "Info log sample 1".to_string(),
///     }]
/// );
/// ```
#[derive(Debug, Default, Clone)]
pub struct RecordingClient {
    events: EventLog,
}

impl RecordingClient {
    /// Creates a new client with no recorded events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every recorded event, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Drops all recorded events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
    }
}

impl TelemetryClient for RecordingClient {
    fn capture_error(&self, error: &SampleError) {
        record(
            &self.events,
            RecordedEvent::Error {
                kind: error.kind(),
                message: error.to_string(),
            },
        );
    }

    fn start_trace(&self, name: &str, op: &str) -> Box<dyn TraceHandle> {
        record(
            &self.events,
            RecordedEvent::TraceStarted {
                name: name.to_string(),
                op: op.to_string(),
            },
        );
        Box::new(RecordingTrace {
            events: Arc::clone(&self.events),
            name: name.to_string(),
        })
    }

    fn start_profile(&self) {
        record(&self.events, RecordedEvent::ProfileStarted);
    }

    fn stop_profile(&self) {
        record(&self.events, RecordedEvent::ProfileStopped);
    }

    fn log(&self, severity: Severity, message: &str) {
        record(
            &self.events,
            RecordedEvent::Log {
                severity,
                message: message.to_string(),
            },
        );
    }

    fn flush(&self, timeout: Duration) -> bool {
        record(&self.events, RecordedEvent::Flush { timeout });
        true
    }
}

struct RecordingTrace {
    events: EventLog,
    name: String,
}

impl TraceHandle for RecordingTrace {
    fn start_child(&self, op: &str, description: &str) -> Box<dyn SpanHandle> {
        record(
            &self.events,
            RecordedEvent::SpanStarted {
                op: op.to_string(),
                description: description.to_string(),
            },
        );
        Box::new(RecordingSpan {
            events: Arc::clone(&self.events),
            op: op.to_string(),
        })
    }

    fn finish(self: Box<Self>) {
        record(&self.events, RecordedEvent::TraceFinished { name: self.name });
    }
}

struct RecordingSpan {
    events: EventLog,
    op: String,
}

impl SpanHandle for RecordingSpan {
    fn finish(self: Box<Self>) {
        record(&self.events, RecordedEvent::SpanFinished { op: self.op });
    }
}
