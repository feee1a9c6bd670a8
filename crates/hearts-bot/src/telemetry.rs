//! Opt-in tracing subscriber for binaries, benches and tests.

use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: OnceLock<()> = OnceLock::new();

/// Installs a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
/// Safe to call repeatedly; a subscriber installed elsewhere wins.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = fmt::Subscriber::builder().with_env_filter(filter).finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
