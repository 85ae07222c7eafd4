//! Logging setup for the executables.
//!
//! Logs always go to stderr; stdout carries data.

use tracing_subscriber::EnvFilter;

/// Returns the filter directive for the given verbosity.
#[must_use]
pub const fn log_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Installs a stderr subscriber. Later calls are ignored.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level(verbose)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(true), "debug");
        assert_eq!(log_level(false), "warn");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging(false);
        init_logging(true);
    }
}
