//! Pact contract document types.
//!
//! One set of types covers every specification version. Version-specific
//! members are optional and left empty when they do not apply: v2 documents
//! carry `providerState`, string queries and flat rules, v3 and later carry
//! `providerStates`, map queries and categorized rules with generators.

use crate::rules::{Generator, MatchingRule, RuleSet};
use crate::{PactResult, SpecificationVersion};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A Pact contract between consumer and provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contract {
    /// Consumer participant
    pub consumer: Participant,
    /// Provider participant
    pub provider: Participant,
    /// HTTP interactions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interactions: Vec<Interaction>,
    /// Message interactions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    /// Contract metadata
    pub metadata: ContractMetadata,
}

impl Contract {
    /// Create an empty contract.
    #[must_use]
    pub fn new(
        consumer: impl Into<String>,
        provider: impl Into<String>,
        specification: SpecificationVersion,
    ) -> Self {
        Self {
            consumer: Participant::new(consumer),
            provider: Participant::new(provider),
            interactions: Vec::new(),
            messages: Vec::new(),
            metadata: ContractMetadata::new(specification),
        }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> PactResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> PactResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A participant in a contract (consumer or provider).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    /// Participant name
    pub name: String,
}

impl Participant {
    /// Create a new participant.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A named provider state with optional parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderState {
    /// State name
    pub name: String,
    /// Parameters available to provider-state generators
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Value>,
}

impl ProviderState {
    /// Create a state without parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: BTreeMap::new(),
        }
    }
}

/// An HTTP interaction in a contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    /// Interaction description
    pub description: String,
    /// Provider state (v2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_state: Option<String>,
    /// Provider states (v3 and later)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provider_states: Vec<ProviderState>,
    /// Expected request
    pub request: Request,
    /// Expected response
    pub response: Response,
}

/// A request query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Query {
    /// v2: `a=1&b=2`
    String(String),
    /// v3 and later: `{"a": ["1"], "b": ["2"]}`
    Map(BTreeMap<String, Vec<String>>),
}

/// Matching rules of one request, response or message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PartRules {
    /// v2: `{"$.body.id": rule}`
    Flat(BTreeMap<String, MatchingRule>),
    /// v3 and later: rules grouped by category
    Categorized(CategorizedRules),
}

impl PartRules {
    /// Whether no rule is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(rules) => rules.is_empty(),
            Self::Categorized(rules) => rules.is_empty(),
        }
    }
}

/// v3 matching rules grouped by category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategorizedRules {
    /// Body rules keyed by `$`-rooted path
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub body: BTreeMap<String, RuleSet>,
    /// Header rules keyed by header name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub header: BTreeMap<String, RuleSet>,
    /// Query rules keyed by parameter name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, RuleSet>,
    /// Request path rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<RuleSet>,
}

impl CategorizedRules {
    /// Whether no rule is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.header.is_empty() && self.query.is_empty() && self.path.is_none()
    }
}

/// v3 generators grouped by category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorizedGenerators {
    /// Body generators keyed by `$`-rooted path
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub body: BTreeMap<String, Generator>,
    /// Header generators keyed by header name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub header: BTreeMap<String, Generator>,
    /// Query generators keyed by parameter name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, Generator>,
    /// Request path generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Generator>,
}

impl CategorizedGenerators {
    /// Whether no generator is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.header.is_empty() && self.query.is_empty() && self.path.is_none()
    }
}

/// HTTP request in an interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// HTTP method
    pub method: String,
    /// Request path
    pub path: String,
    /// Request query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    /// Request headers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Matching rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_rules: Option<PartRules>,
    /// Generators (v3 and later)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generators: Option<CategorizedGenerators>,
}

/// HTTP response in an interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// Response body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Matching rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_rules: Option<PartRules>,
    /// Generators (v3 and later)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generators: Option<CategorizedGenerators>,
}

/// An asynchronous message interaction (v3 and later).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message description
    pub description: String,
    /// Provider states
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provider_states: Vec<ProviderState>,
    /// Message contents
    pub contents: Value,
    /// Matching rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_rules: Option<PartRules>,
    /// Generators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generators: Option<CategorizedGenerators>,
    /// Message metadata, such as the content type
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

/// Contract metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContractMetadata {
    /// Pact specification version
    pub pact_specification: VersionInfo,
    /// Version of the library that wrote the contract
    pub pact_dsl: VersionInfo,
}

/// A `{"version": ..}` record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionInfo {
    /// Version string
    pub version: String,
}

impl ContractMetadata {
    /// Metadata for a contract targeting `specification`.
    #[must_use]
    pub fn new(specification: SpecificationVersion) -> Self {
        Self {
            pact_specification: VersionInfo {
                version: specification.as_str().to_string(),
            },
            pact_dsl: VersionInfo {
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

impl Default for ContractMetadata {
    fn default() -> Self {
        Self::new(SpecificationVersion::default())
    }
}

/// Hands finished contracts to whatever persists or publishes them.
pub trait ContractWriter {
    /// Write `contract`.
    ///
    /// # Errors
    ///
    /// Implementation specific.
    fn write_contract(&self, contract: &Contract) -> PactResult<()>;
}
