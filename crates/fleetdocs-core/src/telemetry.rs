//! Tracing setup for the `fleetdocs` binary.
//!
//! The CLI prints tables, JSON and CSV on stdout, so every log line goes to
//! stderr. `--json-logs` (or `[output] json_logs`) switches the formatter to
//! newline-delimited JSON, which keeps the `event = "..."` fields emitted by
//! [`crate::obs`] machine-readable. `RUST_LOG` overrides the `-v` level.
//!
//! Repeat calls are no-ops: only the first subscriber is installed.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// `level` applies when `RUST_LOG` is unset; `json` selects the JSON formatter.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    // Exactly one of the two formatters is present.
    let (text, json_lines) = if json {
        (
            None,
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .json(),
            ),
        )
    } else {
        (
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            ),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(text)
        .with(json_lines)
        .try_init()
        .ok();
}
