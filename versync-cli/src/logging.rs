use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Default filter directive for a run.
pub fn default_directive(silent: bool) -> &'static str {
    if silent { "warn" } else { "info" }
}

/// Install the global subscriber, writing to stderr so stdout stays
/// reserved for command output. `RUST_LOG` overrides the default level.
pub fn init(silent: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(silent)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}
