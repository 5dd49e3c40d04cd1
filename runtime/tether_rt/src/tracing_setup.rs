//! Tracing subscriber setup.

use std::sync::Once;

/// Environment variable read for the log filter before `RUST_LOG`.
pub const LOG_ENV: &str = "TETHER_LOG";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `TETHER_LOG` or
/// `RUST_LOG` is set, e.g. `TETHER_LOG=tether_rt=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_from_default_env());
        if let Ok(filter) = filter {
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
            if installed.is_err() {
                tracing::debug!("global subscriber already installed");
            }
        }
    });
}
