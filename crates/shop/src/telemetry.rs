//! Tracing bootstrap for embedding applications.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with `EnvFilter` and a fmt layer.
///
/// Defaults to info level for this crate if `RUST_LOG` is not set.
/// Repeated initialization (e.g. across tests) is a no-op.
pub fn init() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cartwheel_shop=info".into());

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
