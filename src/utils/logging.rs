//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured log level.
pub const LOG_ENV: &str = "RTIMECLOCK_LOG";

/// Installs the stderr subscriber. `RTIMECLOCK_LOG` wins over `level`;
/// calling it twice keeps the first subscriber.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
