//! Tracing setup for hosts that don't install their own subscriber.
//!
//! The level can be controlled via the `RUST_LOG` environment variable;
//! without it, this crate logs at INFO and everything else is silent.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_DIRECTIVE: &str = "lyrics_minder=info";

/// Install a global fmt subscriber.
///
/// Returns `false` if a subscriber was already installed (by the host or an
/// earlier call); the existing one is left in place.
pub fn init() -> bool {
    init_with(DEFAULT_DIRECTIVE)
}

/// Like [`init`], with a custom fallback filter
pub fn init_with(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init()
        .is_ok()
}
