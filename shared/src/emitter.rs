//! The telemetry sample emitter.
//!
//! Runs one tick per interval. Every tick sends, in this order: an error
//! sample, a trace sample, a profiling sample, and a log sample.

use crate::config::EmitterConfig;
use crate::models::{
    profile_plan, FaultKind, LogRecord, Severity, Workload, PROFILE_ROUNDS, TRACE_NAME, TRACE_OP,
    TRACE_SPANS,
};
use crate::telemetry::TelemetryClient;
use std::future::Future;

/// Outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of ticks that ran to completion.
    pub iterations: u64,
    /// Whether the shutdown flush finished within its bound.
    pub flushed: bool,
}

/// Sends synthetic telemetry through a [`TelemetryClient`] until shut down.
///
/// # Example
///
/// ```
/// use shared::config::EmitterConfig;
/// use shared::emitter::Emitter;
/// use shared::telemetry::RecordingClient;
///
/// let runtime = tokio::runtime::Builder::new_current_thread()
///     .enable_all()
///     .start_paused(true)
///     .build()
///     .unwrap();
///
/// let config = EmitterConfig::new("https://public@sentry.example.com/1")
///     .unwrap()
///     .with_max_iterations(1);
/// let mut emitter = Emitter::new(RecordingClient::new(), config);
///
/// let summary = runtime.block_on(emitter.run(std::future::pending()));
/// assert_eq!(summary.iterations, 1);
/// ```
#[derive(Debug)]
pub struct Emitter<C> {
    client: C,
    config: EmitterConfig,
    iterations: u64,
}

impl<C: TelemetryClient> Emitter<C> {
    /// Creates an emitter that has not run any ticks yet.
    #[must_use]
    pub fn new(client: C, config: EmitterConfig) -> Self {
        Self {
            client,
            config,
            iterations: 0,
        }
    }

    /// Returns the telemetry client.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Returns the number of completed ticks.
    #[must_use]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// Runs ticks until `shutdown` resolves or the iteration limit is hit,
    /// then flushes the client once.
    ///
    /// Shutdown is observed before each tick and during the delay between
    /// ticks. A tick that has started always runs to completion.
    pub async fn run<F>(&mut self, shutdown: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        let mut shutdown = std::pin::pin!(shutdown);

        tracing::info!(
            interval = ?self.config.interval,
            max_iterations = ?self.config.max_iterations,
            "Emitter starting"
        );

        loop {
            tokio::select! {
                biased;
                () = &mut shutdown => break,
                () = std::future::ready(()) => {}
            }

            if self.limit_reached() {
                tracing::info!(iterations = self.iterations, "Iteration limit reached");
                break;
            }

            self.tick().await;

            if self.limit_reached() {
                tracing::info!(iterations = self.iterations, "Iteration limit reached");
                break;
            }

            println!("Waiting {:?}...\n", self.config.interval);

            tokio::select! {
                () = &mut shutdown => break,
                () = tokio::time::sleep(self.config.interval) => {}
            }
        }

        self.finish()
    }

    /// Runs a single tick: error, trace, profile, then log sample.
    pub async fn tick(&mut self) {
        let iteration = self.iterations + 1;
        println!("\n--- Iteration {iteration} ---");

        self.send_error_sample();
        self.send_trace_sample().await;
        self.send_profiling_sample().await;
        self.send_logs_sample(iteration);

        self.iterations = iteration;
        tracing::debug!(iteration, "Tick complete");
    }

    /// Triggers a randomly chosen fault and captures the resulting error.
    pub fn send_error_sample(&self) -> FaultKind {
        let kind = FaultKind::random(&mut rand::thread_rng());
        self.capture_fault(kind);
        kind
    }

    /// Triggers the given fault and captures the resulting error.
    ///
    /// Returns `true` if an error was captured.
    pub fn capture_fault(&self, kind: FaultKind) -> bool {
        match kind.trigger() {
            Err(err) => {
                self.client.capture_error(&err);
                println!("✓ Error sent: {}", err.kind());
                true
            }
            Ok(value) => {
                tracing::warn!(%kind, %value, "Fault operation did not fail");
                false
            }
        }
    }

    /// Records a trace with three timed child spans.
    pub async fn send_trace_sample(&self) {
        let trace = self.client.start_trace(TRACE_NAME, TRACE_OP);

        for plan in &TRACE_SPANS {
            let span = trace.start_child(plan.op, plan.description);
            tokio::time::sleep(plan.duration).await;
            span.finish();
        }

        trace.finish();
        println!("✓ Trace sent: {TRACE_NAME}");
    }

    /// Runs the slow and fast workloads inside a profiling session.
    ///
    /// Returns the workloads in the order they ran.
    pub async fn send_profiling_sample(&self) -> Vec<Workload> {
        let mut calls = Vec::with_capacity(PROFILE_ROUNDS * 2);

        self.client.start_profile();
        for workload in profile_plan() {
            let marker = workload.run().await;
            tracing::trace!(marker, "Workload finished");
            calls.push(workload);
        }
        self.client.stop_profile();

        println!("✓ Profiling data sent");
        calls
    }

    /// Emits a log at a random severity through both log sinks.
    pub fn send_logs_sample(&self, iteration: u64) -> LogRecord {
        let severity = Severity::random(&mut rand::thread_rng());
        let record = LogRecord::new(severity, iteration);
        self.emit_log(&record);
        record
    }

    /// Emits `record` through the vendor logger and the local logger.
    pub fn emit_log(&self, record: &LogRecord) {
        self.client.log(record.severity, &record.message);
        record.emit_local();
        println!(
            "✓ Log sent: [{}] {}",
            record.severity.to_string().to_uppercase(),
            record.message
        );
    }

    fn limit_reached(&self) -> bool {
        self.config
            .max_iterations
            .is_some_and(|max| self.iterations >= max)
    }

    fn finish(&self) -> RunSummary {
        println!("\n\nStopping sampler...");
        println!("Total iterations: {}", self.iterations);

        let flushed = self.client.flush(self.config.flush_timeout);
        if flushed {
            println!("All events flushed to Sentry. Goodbye!");
        } else {
            tracing::warn!(
                timeout = ?self.config.flush_timeout,
                "Flush timed out before all events were sent"
            );
        }

        RunSummary {
            iterations: self.iterations,
            flushed,
        }
    }
}
