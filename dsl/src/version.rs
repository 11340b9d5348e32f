//! Pact specification versions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The contract-format revision an interaction targets.
///
/// Versions are ordered, so `matcher_version > target` detects a matcher
/// that the target format cannot express.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpecificationVersion {
    /// Version 2: flat matching rules, no generators
    #[serde(rename = "2.0.0")]
    V2,
    /// Version 3: categorized rule sets and generators
    #[default]
    #[serde(rename = "3.0.0")]
    V3,
    /// Version 4: serialized like version 3 as far as matchers go
    #[serde(rename = "4.0")]
    V4,
}

impl SpecificationVersion {
    /// The version string written into contract metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2 => "2.0.0",
            Self::V3 => "3.0.0",
            Self::V4 => "4.0",
        }
    }

    /// Whether rules are wrapped in `{combine, matchers}` rule sets.
    #[must_use]
    pub const fn uses_rule_sets(self) -> bool {
        !matches!(self, Self::V2)
    }
}

impl fmt::Display for SpecificationVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a version string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pact specification version: {0}")]
pub struct UnknownVersion(pub String);

impl FromStr for SpecificationVersion {
    type Err = UnknownVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches(['v', 'V']);
        let major = trimmed.split('.').next().unwrap_or_default();
        let rest_is_zero = trimmed
            .split('.')
            .skip(1)
            .all(|part| part.chars().all(|c| c == '0') && !part.is_empty());

        match (major, rest_is_zero) {
            ("2", true) => Ok(Self::V2),
            ("3", true) => Ok(Self::V3),
            ("4", true) => Ok(Self::V4),
            _ => Err(UnknownVersion(s.to_string())),
        }
    }
}
