//! Diagnostic logging setup
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the binary (or to an embedding application).

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Default filter used when `RUST_LOG` is not set
pub const DEFAULT_DIRECTIVE: &str = "fintrack=warn";

/// Initializes the global tracing subscriber, writing to stderr.
///
/// Safe to call more than once; only the first call installs the subscriber.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // A host application may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
