//! Sentry Sampler CLI
//!
//! Sends a synthetic error, trace, profiling session, and log line to Sentry
//! once per second until interrupted.
//!
//! # Usage
//!
//! ```bash
//! SENTRY_DSN=https://key@o0.ingest.sentry.io/0 sentry-sampler
//! sentry-sampler --dsn https://key@o0.ingest.sentry.io/0 --iterations 10
//! ```

#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use shared::config::{ConfigError, EmitterConfig};
use shared::telemetry::{SentryClient, SentryOptions};
use shared::Emitter;
use std::time::Duration;

/// Release identifier attached to every event.
const RELEASE: &str = concat!(env!("CARGO_PKG_NAME"), "@", env!("CARGO_PKG_VERSION"));

/// Sentry Sampler - emits synthetic telemetry to Sentry
#[derive(Parser)]
#[command(name = "sentry-sampler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sentry DSN to send events to
    #[arg(long, env = "SENTRY_DSN", hide_env_values = true)]
    dsn: Option<String>,

    /// Environment tag attached to events
    #[arg(short, long, env = "SENTRY_ENVIRONMENT")]
    environment: Option<String>,

    /// Delay between ticks, in milliseconds
    #[arg(long, env = "SAMPLER_INTERVAL_MS", default_value_t = 1000)]
    interval_ms: u64,

    /// Upper bound on the shutdown flush, in milliseconds
    #[arg(long, env = "SAMPLER_FLUSH_TIMEOUT_MS", default_value_t = 2000)]
    flush_timeout_ms: u64,

    /// Stop after this many ticks instead of running until interrupted
    #[arg(short = 'n', long, env = "SAMPLER_ITERATIONS")]
    iterations: Option<u64>,
}

impl Cli {
    /// Builds and validates the emitter configuration.
    fn into_config(self) -> Result<EmitterConfig, ConfigError> {
        let mut config = EmitterConfig::from_optional_dsn(self.dsn)?
            .with_interval(Duration::from_millis(self.interval_ms))
            .with_flush_timeout(Duration::from_millis(self.flush_timeout_ms));

        if let Some(environment) = self.environment {
            config = config.with_environment(environment);
        }
        if let Some(iterations) = self.iterations {
            config = config.with_max_iterations(iterations);
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "Failed to load .env file"),
    }

    let config = Cli::parse()
        .into_config()
        .context("Invalid configuration")?;

    println!("Starting Sentry sampler...");
    println!("Sentry DSN: {}...", config.dsn_preview());
    println!(
        "Sending errors, traces, profiling data, and logs every {:?}...",
        config.interval
    );
    println!("Press Ctrl+C to stop\n");

    // The SDK binds to the current thread's hub, so initialize it on the
    // thread that drives the emitter.
    let client = SentryClient::init(SentryOptions {
        dsn: config.parsed_dsn().clone(),
        environment: config.environment.clone(),
        release: Some(RELEASE.to_string()),
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build the Tokio runtime")?;

    let mut emitter = Emitter::new(client, config);
    let summary = runtime.block_on(emitter.run(shutdown_signal()));

    tracing::info!(
        iterations = summary.iterations,
        flushed = summary.flushed,
        "Sampler stopped"
    );

    Ok(())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, stopping sampler");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, stopping sampler");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::telemetry::{RecordedEvent, RecordingClient};

    const DSN: &str = "https://public@sentry.example.com/1";

    fn cli_without_dsn() -> Cli {
        Cli {
            dsn: None,
            environment: None,
            interval_ms: 1000,
            flush_timeout_ms: 2000,
            iterations: None,
        }
    }

    #[test]
    fn test_cli_parse_dsn_flag() {
        let cli = Cli::try_parse_from(["sentry-sampler", "--dsn", DSN]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert_eq!(cli.dsn.as_deref(), Some(DSN));
    }

    #[test]
    fn test_cli_parse_options() {
        let cli = Cli::try_parse_from([
            "sentry-sampler",
            "--dsn",
            DSN,
            "--environment",
            "staging",
            "--interval-ms",
            "250",
            "--flush-timeout-ms",
            "500",
            "-n",
            "4",
        ])
        .unwrap();

        let config = cli.into_config().unwrap();
        assert_eq!(config.environment.as_deref(), Some("staging"));
        assert_eq!(config.interval, Duration::from_millis(250));
        assert_eq!(config.flush_timeout, Duration::from_millis(500));
        assert_eq!(config.max_iterations, Some(4));
    }

    #[test]
    fn test_cli_rejects_non_numeric_interval() {
        let cli = Cli::try_parse_from(["sentry-sampler", "--interval-ms", "soon"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_missing_dsn_is_config_error() {
        let result = cli_without_dsn().into_config();
        assert!(matches!(result, Err(ConfigError::MissingDsn)));
    }

    #[test]
    fn test_zero_interval_is_config_error() {
        let mut cli = cli_without_dsn();
        cli.dsn = Some(DSN.to_string());
        cli.interval_ms = 0;

        let result = cli.into_config();
        assert!(matches!(result, Err(ConfigError::ZeroInterval)));
    }

    #[test]
    fn test_release_name() {
        assert_eq!(RELEASE, format!("sentry-sampler@{}", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_configured_emitter_runs_bounded() {
        let mut cli = cli_without_dsn();
        cli.dsn = Some(DSN.to_string());
        cli.iterations = Some(1);
        cli.flush_timeout_ms = 100;
        let config = cli.into_config().unwrap();

        let client = RecordingClient::new();
        let mut emitter = Emitter::new(client.clone(), config);
        let summary = tokio_test::block_on(emitter.run(std::future::pending()));

        assert_eq!(summary.iterations, 1);
        assert_eq!(
            client.events().last(),
            Some(&RecordedEvent::Flush {
                timeout: Duration::from_millis(100),
            })
        );
    }
}
