//! Logging setup using `tracing` and `tracing-subscriber`
//!
//! Logs go to stderr so they never mix with command output. The level is
//! `warn` by default and `debug` with `--verbose`; `RUST_LOG` overrides both.

use std::io::IsTerminal;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn build_env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("inkan=debug")
        } else {
            EnvFilter::new("warn")
        }
    })
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(verbose: bool) {
    let layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbose)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(verbose))
        .with(layer)
        .try_init();
}
