//! Diagnostic logging.
//!
//! Log records go to stderr; stdout carries only the emitted metadata.
//! `RUST_LOG` overrides the level picked from `--verbose`.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset. Extra verbosity applies to this
/// crate only; dependencies stay at `warn`.
pub fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => return "warn".to_string(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("warn,depwalk={level}")
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
