//! Tracing subscriber configuration.
//!
//! The library itself only emits `tracing` events. Test suites and tools that
//! drive it install a subscriber through [`init_tracing`].

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable consulted for the log filter before `RUST_LOG`.
pub const LOG_LEVEL_ENV: &str = "PACT_LOG_LEVEL";

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level filter
    pub log_level: String,
    /// Whether to output JSON format
    pub json_output: bool,
    /// Whether to print event targets
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            log_level: std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string()),
            json_output: false,
            with_target: true,
        }
    }
}

impl TracingConfig {
    /// Create config with custom log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON output.
    #[must_use]
    pub const fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }

    /// Hide event targets.
    #[must_use]
    pub const fn without_target(mut self) -> Self {
        self.with_target = false;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}

/// Install the global tracing subscriber.
///
/// Returns `false` when a global subscriber was already installed, so every
/// test case may call this without coordinating with the others.
pub fn init_tracing(config: &TracingConfig) -> bool {
    let registry = tracing_subscriber::registry().with(config.filter());

    let result = if config.json_output {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(config.with_target))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(config.with_target))
            .try_init()
    };

    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = TracingConfig::default()
            .with_log_level("debug")
            .with_json_output()
            .without_target();

        assert_eq!(config.log_level, "debug");
        assert!(config.json_output);
        assert!(!config.with_target);
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = TracingConfig::default().with_log_level("warn");
        let first = init_tracing(&config);
        let second = init_tracing(&config);

        // Only one installation can ever win.
        assert!(!(first && second));
        assert!(!second);
    }
}
