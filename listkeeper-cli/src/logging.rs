//! Tracing subscriber setup

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Pick the log level from the global flags; `--quiet` wins over the others
pub fn log_level(verbose: bool, debug: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    }
}

/// Filter directives for `level`
///
/// Request traces from `tower_http` are capped at INFO so `--verbose` does
/// not dump every header.
pub fn filter_directives(level: Level) -> String {
    let http_level = level.min(Level::INFO);
    format!("tower_http={http_level},{level}")
}

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG`, when set and valid, replaces the directives derived from the
/// flags.
pub fn configure_logging(verbose: bool, debug: bool, quiet: bool) {
    let level = log_level(verbose, debug, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level)));

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
