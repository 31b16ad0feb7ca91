//! Logging utilities built on the `tracing` crate.
//!
//! The parser emits `tracing` events (for example on subtype detection);
//! embedding applications usually install their own subscriber. These
//! helpers exist for tools and tests that want sane output with one call.

use std::sync::atomic::{AtomicBool, Ordering};

static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Install the default tracing subscriber.
///
/// Reads the filter from `RUST_LOG`, falling back to
/// `warn,hmp_terrain=info`. Safe to call more than once; only the first
/// call does anything.
pub fn init_default() {
    init_with_filter("warn,hmp_terrain=info");
}

/// Install the default tracing subscriber with an explicit fallback filter.
pub fn init_with_filter(fallback: &str) {
    if TRACING_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::Relaxed)
        .is_ok()
    {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }
}
