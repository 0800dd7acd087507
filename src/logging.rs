// src/logging.rs
// =============================================================================
// Diagnostic logging with `tracing`.
//
// Progress meant for the user is printed with println! elsewhere; this is
// the extra detail you get with -v (or RUST_LOG), written to stderr.
//
//   (none) errors only
//   -v     info   (one line per exported page)
//   -vv    debug  (requests, saved files, skipped images)
//   -vvv   trace
// =============================================================================

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn init_logging(verbosity: u8) -> Result<()> {
    let default_filter = match verbosity {
        0 => "error",
        1 => "wiki_export=info",
        2 => "wiki_export=debug",
        _ => "wiki_export=trace",
    };

    // RUST_LOG wins over -v when it is set
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
