//! Consumer-side Pact DSL.
//!
//! Consumer tests describe expected interactions as example values annotated
//! with matchers. This crate turns those descriptions into contract
//! documents:
//!
//! - [`matchers`]: the matcher vocabulary
//! - [`derive`]: matcher trees derived from a type's shape
//! - [`resolver`]: body, matching rules and generators from one template
//! - [`validation`]: rejects matchers newer than the target specification
//! - [`interaction`] and [`contract`]: builders and the document they fill
//!
//! ```
//! use pact_dsl::matchers::{each_like, like};
//! use pact_dsl::{SpecificationVersion, Template, path, resolve};
//! use serde_json::json;
//!
//! let template = Template::object([("ids", each_like(like(42), 3))]);
//! let resolution = resolve(SpecificationVersion::V2, path::ROOT, &template).unwrap();
//!
//! assert_eq!(resolution.body, json!({"ids": [42, 42, 42]}));
//! assert_eq!(
//!     serde_json::to_value(resolution.matching_rules(SpecificationVersion::V2)).unwrap()["$.ids"],
//!     json!({"match": "type", "min": 3}),
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod contract;
pub mod derive;
pub mod error;
pub mod interaction;
pub mod matchers;
pub mod path;
pub mod resolver;
pub mod rules;
pub mod template;
pub mod validation;
pub mod version;

pub use config::{PactConfig, QueryStringStyle};
pub use contract::{Contract, ContractMetadata, ContractWriter, Interaction, Message, Participant};
pub use error::{PactError, PactResult};
pub use interaction::{InteractionBuilder, MessageBuilder, Pact, RequestBuilder, ResponseBuilder};
pub use matchers::{Matcher, MatcherClass};
pub use resolver::{Resolution, resolve, resolve_unchecked};
pub use rules::{Generator, Generators, MatchingRule, MatchingRules, RenderedRules, RuleSet};
pub use template::Template;
pub use validation::validate;
pub use version::SpecificationVersion;
