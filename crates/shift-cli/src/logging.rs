//! Diagnostic output for `shiftcal`.
//!
//! Logs go to stderr so that `--json` output on stdout can be piped straight
//! into other tools. The default level is `warn`, which still surfaces a
//! discarded vacation file; `-v` flags raise it for the binary and the engine
//! only, keeping dependency noise out.

use tracing_subscriber::EnvFilter;

/// Log targets raised by `-v`.
const CRATE_TARGETS: &[&str] = &["shiftcal", "shift_engine"];

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn default_directives(verbosity: u8) -> String {
    let level = level_for(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. `RUST_LOG`, when set, wins over `-v`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .init();
}
