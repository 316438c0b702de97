//! Diagnostic logging setup.
//!
//! User-facing progress goes through the output formatter; this subscriber
//! only carries `tracing` diagnostics, on stderr. Only errors are shown
//! unless `--verbose` or `RUST_LOG` asks for more.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_directive = if verbose { "sdkpack=debug,sdkpack_core=debug" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
