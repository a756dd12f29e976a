//! Sentry Sampler Shared Library
//!
//! This crate contains the sample models, telemetry clients, configuration,
//! and the emitter loop used by the `sentry-sampler` binary.
//!
//! # Modules
//!
//! - [`models`] - Fault kinds, log severities, and trace/profile plans
//! - [`telemetry`] - The telemetry client trait and its implementations
//! - [`config`] - Emitter configuration and validation
//! - [`emitter`] - The tick loop that sends one sample of each kind
//!
//! # Example
//!
//! ```
//! use shared::models::FaultKind;
//! use shared::telemetry::{RecordedEvent, RecordingClient, TelemetryClient};
//!
//! let client = RecordingClient::new();
//! let err = FaultKind::DivisionByZero.trigger().unwrap_err();
//! client.capture_error(&err);
//!
//! assert!(matches!(
//!     client.events().as_slice(),
//!     [RecordedEvent::Error { kind: FaultKind::DivisionByZero, .. }]
//! ));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod emitter;
pub mod models;
pub mod telemetry;

#[cfg(test)]
mod test_util;

pub use config::{ConfigError, EmitterConfig};
pub use emitter::{Emitter, RunSummary};
