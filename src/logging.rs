//! Logging setup
//!
//! `RUST_LOG` takes precedence; otherwise `--verbose` selects debug output
//! for this crate. Everything goes to stderr.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "svcreg=debug" } else { "svcreg=info" };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
