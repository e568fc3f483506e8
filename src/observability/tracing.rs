//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence. Without it the `-v` count picks the level.
//! Output always goes to stderr so reports on stdout stay parseable.

use tracing_subscriber::EnvFilter;

/// Map a `-v` count to a default filter directive.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "rehab_estimator={level},warn",
            level = level_for_verbosity(verbosity)
        ))
    })
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_tracing(verbosity: u8, plain: bool) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_ansi(!plain)
        .with_target(verbosity >= 2)
        .try_init();

    if result.is_err() {
        tracing::trace!("Tracing subscriber already installed");
    }
}
