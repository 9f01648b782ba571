//! Stderr log output for the CLI.
//!
//! The library logs through the `log` facade. Records are bridged into a
//! `tracing` fmt subscriber that writes to stderr.

use log::LevelFilter;
use tracing_log::{AsTrace, LogTracer};

/// Maps the number of `--verbose` flags to a level filter.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the `log` bridge and the stderr subscriber.
///
/// Calling this twice keeps the first installation.
pub fn init(verbosity: u8) {
    let level = level_for(verbosity);
    if LogTracer::init_with_filter(level).is_err() {
        return;
    }

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.as_trace())
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}
