//! Data models for the samples sent on each tick.
//!
//! This module contains the fault kinds behind error samples, log severities,
//! and the fixed plans for trace and profiling samples.

pub mod fault;
pub mod sample;
pub mod severity;

pub use fault::{FaultKind, SampleError};
pub use sample::{
    profile_plan, SpanPlan, Workload, PROFILE_ROUNDS, TRACE_NAME, TRACE_OP, TRACE_SPANS,
};
pub use severity::{LogRecord, Severity};
