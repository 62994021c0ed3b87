//! Tracing subscriber setup.
//!
//! Diagnostics go to stderr so stdout stays reserved for command output.
//! `RUST_LOG` wins over the `-v` flags when set.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity level (`-v` count).
#[must_use]
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
