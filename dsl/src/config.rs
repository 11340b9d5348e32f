//! Pact configuration.

use crate::SpecificationVersion;
use pact_common::TracingConfig;
use pact_common::tracing_config::LOG_LEVEL_ENV;
use tracing::warn;

/// Environment variable selecting the default specification version.
pub const SPECIFICATION_ENV: &str = "PACT_SPECIFICATION";

/// How repeated query parameters are written in a v2 query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryStringStyle {
    /// `a=1&a=2`
    #[default]
    Default,
    /// `a=1` for one value, `a[]=1&a[]=2` for several
    Array,
    /// `a[]=1`, whatever the number of values
    AlwaysArray,
}

/// Settings shared by every interaction of one pact.
#[derive(Debug, Clone)]
pub struct PactConfig {
    /// Consumer name
    pub consumer: String,
    /// Provider name
    pub provider: String,
    /// Target specification version
    pub specification: SpecificationVersion,
    /// Query string rendering for v2 documents
    pub query_string_style: QueryStringStyle,
    /// Log filter handed to the tracing subscriber
    pub log_level: String,
}

impl Default for PactConfig {
    fn default() -> Self {
        Self {
            consumer: String::new(),
            provider: String::new(),
            specification: specification_from_env(),
            query_string_style: QueryStringStyle::Default,
            log_level: std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string()),
        }
    }
}

fn specification_from_env() -> SpecificationVersion {
    let Ok(raw) = std::env::var(SPECIFICATION_ENV) else {
        return SpecificationVersion::default();
    };

    raw.parse().unwrap_or_else(|e| {
        warn!(error = %e, "ignoring {SPECIFICATION_ENV}");
        SpecificationVersion::default()
    })
}

impl PactConfig {
    /// Create a configuration for a consumer/provider pair.
    #[must_use]
    pub fn new(consumer: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            consumer: consumer.into(),
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the target specification version.
    #[must_use]
    pub const fn with_specification(mut self, specification: SpecificationVersion) -> Self {
        self.specification = specification;
        self
    }

    /// Set the v2 query string style.
    #[must_use]
    pub const fn with_query_string_style(mut self, style: QueryStringStyle) -> Self {
        self.query_string_style = style;
        self
    }

    /// Set the log filter.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Tracing settings for this configuration.
    #[must_use]
    pub fn tracing(&self) -> TracingConfig {
        TracingConfig::default().with_log_level(&self.log_level)
    }
}
