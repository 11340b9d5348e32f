//! Pact DSL error types using thiserror 2.0.
//!
//! Every error here is deterministic: the same input always fails the same
//! way, so none of them is worth retrying.

use crate::SpecificationVersion;
use thiserror::Error;

/// Errors raised while deriving, validating or serializing contract parts.
#[derive(Error, Debug)]
pub enum PactError {
    /// A `pact` field annotation could not be parsed or used
    #[error("invalid pact tag {tag:?}: {reason}")]
    InvalidTag {
        /// The raw annotation
        tag: String,
        /// Why it was rejected
        reason: String,
    },

    /// A type whose shape cannot be expressed without a hand-written matcher
    #[error("cannot derive a matcher for {type_name}: unsupported {kind} kind")]
    UnsupportedType {
        /// Name of the offending type
        type_name: String,
        /// Structural kind of the offending type
        kind: String,
    },

    /// Matchers from a newer specification inside an older interaction
    #[error(
        "the current pact file with specification version {version} has attempted to use matchers from a higher spec version: {}",
        .matchers.join(", ")
    )]
    SpecificationMismatch {
        /// The interaction's target version
        version: SpecificationVersion,
        /// Matcher types that need a newer version
        matchers: Vec<String>,
    },

    /// An interaction part resolved to something its position cannot hold
    #[error("invalid {part}: {reason}")]
    InvalidPart {
        /// Which part (request path, header, ...)
        part: String,
        /// Why it was rejected
        reason: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for Pact DSL operations.
pub type PactResult<T> = Result<T, PactError>;

impl PactError {
    /// Check if the error comes from how a type or its annotations were declared.
    ///
    /// Configuration errors abort schema derivation for the whole type.
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidTag { .. } | Self::UnsupportedType { .. })
    }

    /// Create an invalid tag error.
    #[must_use]
    pub fn invalid_tag(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported type error.
    #[must_use]
    pub fn unsupported(type_name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
            kind: kind.into(),
        }
    }

    /// Create an invalid part error.
    #[must_use]
    pub fn invalid_part(part: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPart {
            part: part.into(),
            reason: reason.into(),
        }
    }
}
