//! Logging initialization.
//!
//! `RUST_LOG` wins over the configured filter:
//!
//! ```bash
//! RUST_LOG=uhh_infrastructure=debug,info uhh
//! ```

use tracing_subscriber::{EnvFilter, fmt};
use uhh_core::config::LoggingConfig;

/// Filter from `RUST_LOG`, else the configured directive, else `info`.
fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// Returns `false` if a subscriber was already installed; calling this more
/// than once is harmless.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let builder = fmt()
        .with_env_filter(env_filter(config))
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(LoggingConfig::default().filter).is_ok());
    }

    #[test]
    fn test_second_init_is_harmless() {
        let config = LoggingConfig::default();
        init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
