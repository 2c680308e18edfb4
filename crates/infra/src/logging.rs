//! Tracing subscriber bootstrap for binaries and examples

use apigee_domain::{ApigeeError, Result};
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `verbosity` picks the level:
/// `0` → warn, `1` → info, anything higher → debug.
///
/// # Errors
/// Returns `ApigeeError::Config` if `RUST_LOG` cannot be parsed or a global
/// subscriber is already installed.
pub fn init_tracing(verbosity: u8) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive(verbosity))
            .map_err(|err| ApigeeError::Config(format!("invalid log filter: {err}")))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| ApigeeError::Config(format!("failed to install tracing subscriber: {err}")))
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
