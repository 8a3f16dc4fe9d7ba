//! Process-wide log output for the binary
//!
//! The library itself only talks to a [`crate::report::MergeLog`]; this
//! module installs the `tracing` subscriber that [`crate::report::TracingLog`]
//! writes through. Lines look like `10/16/2026 09:41:07  INFO copying a => b`.

use crate::types::MergeError;
use std::io::IsTerminal;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the level, e.g. `CONTENTCOPY_LOG=debug`
pub const LOG_ENV: &str = "CONTENTCOPY_LOG";

/// Timestamp layout for log lines
pub const TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S";

/// Level filter for the CLI verbosity flags
pub fn level_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber
///
/// `CONTENTCOPY_LOG` wins over the flags when set. Calling this twice is an
/// error rather than a second set of handlers.
pub fn init_logging(verbosity: u8, quiet: bool) -> Result<(), MergeError> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| MergeError::Config(format!("Failed to initialize logging: {}", e)))
}
