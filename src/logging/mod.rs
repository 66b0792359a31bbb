//! Structured logging via the `tracing` crate.
//!
//! Initialization is idempotent: the forge can run inside a host app that
//! already installed a subscriber (e.g. Bevy's LogPlugin), in which case
//! this is a no-op.

use bevy::prelude::*;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

pub struct LoggingPlugin;

impl Plugin for LoggingPlugin {
    fn build(&self, _app: &mut App) {
        init_tracing_default();
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing with env-filter defaults (idempotent, safe to call
/// multiple times)
pub fn init_tracing_default() {
    TRACING_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .compact();

        // Ignore error if a global subscriber is already set
        let _ = subscriber.try_init();
    });
}
