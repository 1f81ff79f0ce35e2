// * Telemetry - structured logging setup
// * Events go to stderr so stdout stays clean for serialized header output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber with JSON formatting
///
/// # Example
/// ```ignore
/// use header_forge::ops::telemetry;
///
/// telemetry::init_tracing();
/// let profile = header_forge::HeaderProfile::new();
/// ```
pub fn init_tracing() {
    init_tracing_with_level("info");
}

/// Initializes tracing with a fallback level, used when `RUST_LOG` is unset
pub fn init_tracing_with_level(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    // * A second init (e.g. across tests) is ignored
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init();
}

/// Initializes tracing with pretty formatting (for development)
pub fn init_tracing_pretty() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_tracing_with_level("debug");
        init_tracing();
        init_tracing_pretty();
        tracing::debug!("telemetry initialized");
    }
}
