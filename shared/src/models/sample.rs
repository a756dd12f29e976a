//! Fixed plans for trace and profiling samples.

use std::time::Duration;

/// Name of the transaction recorded by a trace sample.
pub const TRACE_NAME: &str = "test_transaction";

/// Operation of the transaction recorded by a trace sample.
pub const TRACE_OP: &str = "test";

/// A child span recorded inside a trace sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanPlan {
    /// Span operation.
    pub op: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// How long the span is held open.
    pub duration: Duration,
}

/// Child spans of a trace sample, in the order they are recorded.
pub const TRACE_SPANS: [SpanPlan; 3] = [
    SpanPlan {
        op: "db",
        description: "Database query",
        duration: Duration::from_millis(50),
    },
    SpanPlan {
        op: "http",
        description: "API call",
        duration: Duration::from_millis(30),
    },
    SpanPlan {
        op: "process",
        description: "Data processing",
        duration: Duration::from_millis(20),
    },
];

/// Number of slow/fast rounds run inside a profiling session.
pub const PROFILE_ROUNDS: usize = 3;

/// A dummy workload run inside a profiling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workload {
    /// Simulates a slow operation.
    Slow,
    /// Simulates a fast operation.
    Fast,
}

impl Workload {
    /// How long the workload takes.
    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(100),
            Self::Fast => Duration::from_millis(50),
        }
    }

    /// Runs the workload and returns its completion marker.
    pub async fn run(self) -> &'static str {
        tokio::time::sleep(self.duration()).await;
        match self {
            Self::Slow => "slow_done",
            Self::Fast => "fast_done",
        }
    }
}

/// The workload sequence of one profiling session: slow, fast, repeated.
pub fn profile_plan() -> impl Iterator<Item = Workload> {
    std::iter::repeat([Workload::Slow, Workload::Fast])
        .take(PROFILE_ROUNDS)
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_span_order() {
        let ops: Vec<&str> = TRACE_SPANS.iter().map(|span| span.op).collect();
        assert_eq!(ops, vec!["db", "http", "process"]);
    }

    #[test]
    fn test_profile_plan_interleaves() {
        let plan: Vec<Workload> = profile_plan().collect();
        assert_eq!(
            plan,
            vec![
                Workload::Slow,
                Workload::Fast,
                Workload::Slow,
                Workload::Fast,
                Workload::Slow,
                Workload::Fast,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_workload_run_sleeps_for_duration() {
        let start = tokio::time::Instant::now();
        assert_eq!(Workload::Slow.run().await, "slow_done");
        assert!(start.elapsed() >= Duration::from_millis(100));

        let start = tokio::time::Instant::now();
        assert_eq!(Workload::Fast.run().await, "fast_done");
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
