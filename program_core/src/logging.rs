//! Tracing setup for liftplan.
//!
//! Log lines go to stderr so that program listings on stdout stay clean.
//! `RUST_LOG` always takes precedence over the level chosen here.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter for a `-v` count: warn, info, then debug
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the subscriber for the given `-v` count
pub fn init(verbosity: u8) {
    init_with_level(level_for_verbosity(verbosity))
}

/// Install the subscriber with `default_level` unless `RUST_LOG` is set
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Route logs through the test harness writer
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for_verbosity(0), "warn");
        assert_eq!(level_for_verbosity(1), "info");
        assert_eq!(level_for_verbosity(2), "debug");
        assert_eq!(level_for_verbosity(9), "debug");
    }
}
