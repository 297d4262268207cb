//! tracing subscriber setup. Logs go to stderr; stdout carries results.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` for this crate when verbose.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "warn,iss_flyover=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // already installed when embedded or called twice
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init();
}
