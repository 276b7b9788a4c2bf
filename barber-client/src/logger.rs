//! Logging setup
//!
//! Console output through `tracing-subscriber`. `RUST_LOG` overrides the
//! level passed in.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default filter when neither `RUST_LOG` nor a level is given
pub const DEFAULT_FILTER: &str = "barber_client=info";

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Filter directive (e.g. "info", "barber_client=debug")
/// * `json_format` - JSON lines instead of the human-readable format
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true);
        subscriber.with(console_layer).try_init()?;
    } else {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true);
        subscriber.with(console_layer).try_init()?;
    }

    Ok(())
}

/// Initialize logging with [`DEFAULT_FILTER`]
pub fn init() -> anyhow::Result<()> {
    init_logger(DEFAULT_FILTER, false)
}
