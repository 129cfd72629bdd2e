// src/logging.rs
// =============================================================================
// Sets up `tracing` output for the whole program.
//
// - Level comes from RUST_LOG (e.g. RUST_LOG=debug), defaulting to "info"
// - Everything goes to stderr, so `--json` output on stdout stays parseable
// =============================================================================

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

// Installs the global subscriber; call once at startup
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
