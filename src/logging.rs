//! Diagnostic logging.
//!
//! Library code logs through `tracing` macros; the binary installs a `fmt`
//! subscriber writing to stderr so stdout stays reserved for the build summary.
//!
//! The filter comes from `SCRIPT_META_LOG` (standard `EnvFilter` syntax, e.g.
//! `script_meta=debug`). Without it, each `-v` on the command line raises the
//! level one step from `warn`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "SCRIPT_META_LOG";

/// Default level for a given number of `-v` flags.
pub fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}
