//! Test fixtures with sample data.
//!
//! Described record types for derivation tests and ready-made templates and
//! configurations for interaction tests.

use pact_dsl::derive::{Describe, Field, TypeDescriptor};
use pact_dsl::matchers::{each_like, like, term, uuid};
use pact_dsl::{PactConfig, SpecificationVersion, Template};

/// A record with untagged string and integer fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleWord {
    /// The word
    pub word: String,
    /// Its length
    pub length: i32,
}

impl Describe for SampleWord {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::record("SampleWord")
            .field(Field::new::<String>("word"))
            .field(Field::new::<i32>("length"))
    }
}

/// A record exercising the supported annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleDated {
    /// ISO date, annotated with an example and pattern
    pub date: String,
    /// Words, at least two
    pub words: Vec<SampleWord>,
    /// Optional score, annotated with an example
    pub score: Option<f64>,
    /// Never serialized
    pub cache_key: String,
}

/// Annotation on [`SampleDated::date`].
pub const DATE_TAG: &str = r"example=2000-01-01,regex=^\d{4}-\d{2}-\d{2}$";

impl Describe for SampleDated {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::record("SampleDated")
            .field(Field::new::<String>("date").pact(DATE_TAG))
            .field(Field::new::<Vec<SampleWord>>("words").pact("min=2"))
            .field(Field::new::<Option<f64>>("score").pact("example=9.5"))
            .field(Field::new::<String>("cache_key").skip())
    }
}

/// A user resource template mixing literals and matchers.
#[must_use]
pub fn user_template() -> Template {
    Template::object([
        ("id", Template::from(uuid())),
        ("name", Template::from(like("Fred"))),
        ("role", Template::from("admin")),
        (
            "emails",
            Template::from(each_like(
                term("fred@example.com", r"^[^@]+@[^@]+$"),
                2,
            )),
        ),
    ])
}

/// Configuration for a sample consumer/provider pair.
#[must_use]
pub fn sample_config(specification: SpecificationVersion) -> PactConfig {
    PactConfig::new("web-app", "user-service").with_specification(specification)
}
