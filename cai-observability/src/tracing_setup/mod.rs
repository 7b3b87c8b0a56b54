//! Tracing setup: structured logging with per-stage spans.

pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cai_core::config::ObservabilityConfig;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "CAI_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber.
///
/// `CAI_LOG` takes precedence over `config.log_level`. Output is JSON when
/// `config.json_logs` is set. Idempotent; if another subscriber is already
/// installed this is a no-op.
pub fn init_tracing(config: &ObservabilityConfig) {
    let level = config.log_level.clone();
    let json = config.json_logs;
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&level));
        install(filter, json);
    });
}

/// Install the global subscriber with an explicit filter, ignoring `CAI_LOG`.
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);
    INIT.call_once(|| install(filter, false));
}

fn install(filter: EnvFilter, json: bool) {
    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(true))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()
    };
    if result.is_err() {
        tracing::debug!("global subscriber already set");
    }
}
