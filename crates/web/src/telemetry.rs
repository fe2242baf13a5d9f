//! Process-wide tracing for the session host.

use tracing_subscriber::EnvFilter;

/// Install the global JSON log subscriber.
///
/// Defaults to `info` with session issue/flush events visible at `debug`;
/// `RUST_LOG` overrides both. Repeated calls are no-ops so tests and the
/// binary can share it.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gemstone_session=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
