//! Diagnostic logging
//!
//! Log lines go to stderr through a `tracing-subscriber` fmt layer. `RUST_LOG`
//! wins when set; otherwise the level follows `--verbose` and `--quiet`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive used when `RUST_LOG` is not set
pub fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "bomr=error"
    } else if verbose {
        "bomr=debug"
    } else {
        "bomr=warn"
    }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(verbose, quiet).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
