//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging with `RUST_LOG` environment variable support.
///
/// Defaults to `reelfind=info` when `RUST_LOG` is not set. Logs go to stderr
/// so they never mix with results printed on stdout.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("reelfind=info,reelfind_lib=info"));

    // try_init so a second call is a no-op instead of a panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
