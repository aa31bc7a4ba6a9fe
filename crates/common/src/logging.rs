//! Logging and tracing initialization.

use crate::config::LoggingConfig;

/// Crates outside the workspace only log warnings unless `RUST_LOG` says otherwise.
const DEPENDENCY_LEVEL: &str = "warn";

/// Filter directives for a configured level.
///
/// A bare level such as `"debug"` applies to the `repcoach_*` crates only.
/// Anything containing `=` or `,` is taken as a full directive list.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        return format!("{DEPENDENCY_LEVEL},repcoach=info");
    }
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    format!("{DEPENDENCY_LEVEL},repcoach={level}")
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.level)));

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .json()
            .with_current_span(false)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}
