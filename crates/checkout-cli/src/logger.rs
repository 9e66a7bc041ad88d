//! # Logging
//!
//! Log output goes to stderr so stdout carries only the checkout result.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// Load `.env` first (see [`crate::config::load_dotenv`]) so a `RUST_LOG`
/// set there is seen.
pub fn init(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .with(env_filter(verbose, EnvFilter::DEFAULT_ENV))
        .init();
}

/// Filter read from `env_var`, falling back to `warn` (`debug` when verbose)
pub fn env_filter(verbose: bool, env_var: &str) -> EnvFilter {
    let default_level = if verbose { Level::DEBUG } else { Level::WARN };

    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(env_var)
        .from_env_lossy()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_dotenv;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_filter_from_env_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"CHECKOUT_LOGGER_TEST=checkout=trace\n").unwrap();

        assert!(load_dotenv(Some(file.path())).is_some());
        let filter = env_filter(false, "CHECKOUT_LOGGER_TEST");
        assert!(filter.to_string().contains("checkout=trace"));
    }

    #[test]
    fn test_filter_default_level() {
        let filter = env_filter(true, "CHECKOUT_LOGGER_UNSET");
        assert!(filter.to_string().contains("debug"));
    }
}
