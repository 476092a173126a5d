//! Log output for the binary.
//!
//! Library code only emits `tracing` events. The binary installs a `fmt`
//! subscriber writing to stderr, so stdout carries nothing but progress lines,
//! HTML and JSON Lines.

use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Environment variable holding an `EnvFilter` directive, e.g.
/// `CHATVIEW_LOG=chatview::decoder=debug`.
pub const LOG_ENV: &str = "CHATVIEW_LOG";

/// Builds the filter: [`LOG_ENV`] if set and valid, else `default`.
pub fn filter(default: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default.as_str()))
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init(default: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        // CHATVIEW_LOG is not set by the test harness
        if std::env::var_os(LOG_ENV).is_none() {
            assert_eq!(filter(LogLevel::Info).to_string(), "info");
        }
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(LogLevel::Warn);
        init(LogLevel::Debug);
    }
}
