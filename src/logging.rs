// src/logging.rs
// =============================================================================
// Sets up tracing for the binary.
//
// Logs go to stderr so stdout carries nothing but the crawl output.
// The level comes from RUST_LOG (e.g. RUST_LOG=wordcrawl=debug) and
// defaults to "info".
// =============================================================================

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
