//! Logging setup
//!
//! The library only emits `tracing` events. Binaries and tests that want
//! to see them call [`init_logging`] once; `RUST_LOG` overrides the level.

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber at `default_level` (e.g. `"info"`).
///
/// Returns `false` when a global subscriber was already installed, which
/// makes repeated calls from tests harmless.
pub fn init_logging(default_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ies_core={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
