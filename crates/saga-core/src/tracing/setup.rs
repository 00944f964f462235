//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `SAGA_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "saga_core=info,saga_engine=info";

/// Initialize the Saga tracing/logging system.
///
/// Reads `SAGA_LOG` for per-module log levels, e.g.
/// `SAGA_LOG=saga_engine::integrity=debug,saga_engine::governance=info`.
///
/// Idempotent; only the first call installs a subscriber. If the host
/// application already installed a global subscriber this is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("SAGA_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
