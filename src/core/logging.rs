//! Logging setup for the CLI
//!
//! Filter comes from `NEOIWL_LOG` (default `warn`). Output goes to stderr
//! so stdout stays parseable.

use tracing_subscriber::EnvFilter;

/// Env var holding the tracing filter
pub const LOG_ENV_VAR: &str = "NEOIWL_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(err) = installed {
        tracing::debug!(error = %err, "subscriber already installed");
    }
}
