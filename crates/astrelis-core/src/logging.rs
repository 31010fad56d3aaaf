//! Logging setup based on `tracing-subscriber`.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,astrelis_vg=debug,wgpu_core=info,wgpu_hal=info,naga=info";

/// Install the global fmt subscriber.
///
/// Honours `RUST_LOG` when present, otherwise falls back to [`DEFAULT_FILTER`].
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Install the global fmt subscriber with an explicit filter directive string.
pub fn init_with_filter(directives: &str) {
    install(EnvFilter::new(directives));
}

fn install(filter: EnvFilter) {
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::trace!("Global subscriber already installed");
    }
}
