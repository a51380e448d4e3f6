//! Tracing subscriber initialization.

use tracing_subscriber::{fmt, EnvFilter};
use workdeck_core::Config;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter. Safe to call once per process; later calls are no-ops.
pub fn init_telemetry(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("workdeck=debug,tower_http=debug"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact();

    if config.is_production() {
        // Production log collectors want one JSON object per line.
        let _ = subscriber.json().try_init();
    } else {
        let _ = subscriber.try_init();
    }
}
