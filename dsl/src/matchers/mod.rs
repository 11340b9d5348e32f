//! The matcher vocabulary.
//!
//! Every [`Matcher`] pairs one comparison strategy with a representative
//! example. Matchers are immutable once built; the resolver only reads them,
//! so one tree may be resolved any number of times.
//!
//! Constructors are total. The only local check is the array cardinality
//! floor, which is corrected with a warning rather than rejected. Whether a
//! matcher is legal for an interaction's specification version is checked
//! later, by [`crate::validation`].

mod integration;
mod term;

pub use integration::{GENERATOR_TYPE_KEY, MATCHER_TYPE_KEY, SPECIFICATION_KEY};
pub use term::{
    date, hex_value, identifier, ip_address, ipv4_address, ipv6_address, time, timestamp, uuid,
};

use crate::rules::{Generator, MatchingRule};
use crate::{SpecificationVersion, Template};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Discriminant of a [`Matcher`], used for dispatch and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherClass {
    /// Type match
    Like,
    /// Regular expression match
    Regex,
    /// Array of at least `min` elements shaped like the template
    ArrayMinLike,
    /// Array of between `min` and `max` elements shaped like the template
    ArrayMinMaxLike,
    /// Any integer
    Integer,
    /// Any decimal
    Decimal,
    /// Only null
    Null,
    /// Exact equality
    Equality,
    /// Substring inclusion
    Includes,
    /// Heterogeneous, order-independent array contents
    ArrayContaining,
    /// Map values shaped like a template
    EachKeyLike,
    /// Value injected from provider state
    FromProviderState,
    /// Generated date
    DateGenerator,
    /// Generated time
    TimeGenerator,
    /// Generated date-time
    DateTimeGenerator,
    /// Object container of nested matchers
    Struct,
}

impl MatcherClass {
    /// The `pact:matcher:type` marker written in integration JSON.
    #[must_use]
    pub const fn matcher_type(self) -> &'static str {
        match self {
            Self::Like | Self::ArrayMinLike | Self::ArrayMinMaxLike | Self::FromProviderState => {
                "type"
            }
            Self::Regex => "regex",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Null => "null",
            Self::Equality => "equality",
            Self::Includes => "include",
            Self::ArrayContaining => "arrayContains",
            Self::EachKeyLike => "values",
            Self::DateGenerator => "date",
            Self::TimeGenerator => "time",
            Self::DateTimeGenerator => "timestamp",
            Self::Struct => "struct",
        }
    }

    /// The oldest specification version able to express this matcher.
    #[must_use]
    pub const fn specification(self) -> SpecificationVersion {
        match self {
            Self::Like | Self::Regex | Self::ArrayMinLike | Self::Struct => SpecificationVersion::V2,
            _ => SpecificationVersion::V3,
        }
    }

    /// Human readable class name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Regex => "regex",
            Self::ArrayMinLike => "arrayMinLike",
            Self::ArrayMinMaxLike => "arrayMinMaxLike",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Null => "null",
            Self::Equality => "equality",
            Self::Includes => "includes",
            Self::ArrayContaining => "arrayContaining",
            Self::EachKeyLike => "eachKeyLike",
            Self::FromProviderState => "fromProviderState",
            Self::DateGenerator => "dateGenerated",
            Self::TimeGenerator => "timeGenerated",
            Self::DateTimeGenerator => "dateTimeGenerated",
            Self::Struct => "struct",
        }
    }
}

impl fmt::Display for MatcherClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which clock value a generator matcher produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeKind {
    /// A date
    Date,
    /// A time of day
    Time,
    /// A date and time
    DateTime,
}

/// A comparison strategy paired with an example value.
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    /// Match on type; the content may hold further matchers
    Like(Template),
    /// Match a string against a regular expression
    Regex {
        /// Example value, shown in the body
        example: String,
        /// The pattern
        regex: String,
    },
    /// An array of at least `min` elements like `content`
    EachLike {
        /// Element template
        content: Template,
        /// Minimum length, at least 1
        min: usize,
    },
    /// An array of between `min` and `max` elements like `content`
    ArrayMinMaxLike {
        /// Element template
        content: Template,
        /// Minimum length, at least 1
        min: usize,
        /// Maximum length
        max: usize,
    },
    /// Any integer
    Integer(i64),
    /// Any decimal
    Decimal(f64),
    /// Only null
    Null,
    /// Exact equality, resetting cascading type matches
    Equality(Template),
    /// A string containing the given substring
    Includes(String),
    /// Every variant matches at least one element, in any order
    ArrayContaining(Vec<Template>),
    /// A map whose values all match `template`
    EachKeyLike {
        /// Key used only for the example body
        key: String,
        /// Template every value must match
        template: Template,
    },
    /// A value substituted from provider-state parameters at verification time
    FromProviderState {
        /// Expression evaluated against the provider-state parameters
        expression: String,
        /// Example used by the consumer test
        example: Value,
    },
    /// A date or time in `format`, regenerated at verification time
    DateTime {
        /// Date, time or both
        kind: DateTimeKind,
        /// Example matching `format`
        example: String,
        /// Format pattern
        format: String,
    },
    /// An object of nested matchers
    Struct(BTreeMap<String, Template>),
}

impl Matcher {
    /// The matcher's class.
    #[must_use]
    pub const fn class(&self) -> MatcherClass {
        match self {
            Self::Like(_) => MatcherClass::Like,
            Self::Regex { .. } => MatcherClass::Regex,
            Self::EachLike { .. } => MatcherClass::ArrayMinLike,
            Self::ArrayMinMaxLike { .. } => MatcherClass::ArrayMinMaxLike,
            Self::Integer(_) => MatcherClass::Integer,
            Self::Decimal(_) => MatcherClass::Decimal,
            Self::Null => MatcherClass::Null,
            Self::Equality(_) => MatcherClass::Equality,
            Self::Includes(_) => MatcherClass::Includes,
            Self::ArrayContaining(_) => MatcherClass::ArrayContaining,
            Self::EachKeyLike { .. } => MatcherClass::EachKeyLike,
            Self::FromProviderState { .. } => MatcherClass::FromProviderState,
            Self::DateTime { kind, .. } => match kind {
                DateTimeKind::Date => MatcherClass::DateGenerator,
                DateTimeKind::Time => MatcherClass::TimeGenerator,
                DateTimeKind::DateTime => MatcherClass::DateTimeGenerator,
            },
            Self::Struct(_) => MatcherClass::Struct,
        }
    }

    /// The example value, with nested matchers replaced by their examples.
    #[must_use]
    pub fn example(&self) -> Value {
        match self {
            Self::Like(content) | Self::Equality(content) => content.example(),
            Self::Regex { example, .. } | Self::DateTime { example, .. } => {
                Value::from(example.as_str())
            }
            Self::EachLike { content, min } => Value::Array(vec![content.example(); *min]),
            Self::ArrayMinMaxLike { content, min, max } => {
                Value::Array(vec![content.example(); repetitions(*min, *max)])
            }
            Self::Integer(n) => Value::from(*n),
            Self::Decimal(x) => Value::from(*x),
            Self::Null => Value::Null,
            Self::Includes(s) => Value::from(s.as_str()),
            Self::ArrayContaining(variants) => {
                Value::Array(variants.iter().map(Template::example).collect())
            }
            Self::EachKeyLike { key, template } => {
                Value::Object(std::iter::once((key.clone(), template.example())).collect())
            }
            Self::FromProviderState { example, .. } => example.clone(),
            Self::Struct(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.example()))
                    .collect(),
            ),
        }
    }

    /// The rule recorded at this matcher's path.
    ///
    /// Struct containers record no rule of their own.
    #[must_use]
    pub fn matching_rule(&self) -> Option<MatchingRule> {
        let rule = match self {
            Self::Like(_) | Self::FromProviderState { .. } => MatchingRule::type_match(),
            Self::Regex { regex, .. } => MatchingRule::Regex {
                regex: regex.clone(),
            },
            Self::EachLike { min, .. } => MatchingRule::min_type(*min),
            Self::ArrayMinMaxLike { min, max, .. } => MatchingRule::min_max_type(*min, *max),
            Self::Integer(_) => MatchingRule::Integer,
            Self::Decimal(_) => MatchingRule::Decimal,
            Self::Null => MatchingRule::Null,
            Self::Equality(_) => MatchingRule::Equality,
            Self::Includes(value) => MatchingRule::Include {
                value: value.clone(),
            },
            Self::ArrayContaining(variants) => MatchingRule::ArrayContains {
                variants: crate::resolver::resolve_variants(variants),
            },
            Self::EachKeyLike { .. } => MatchingRule::Values,
            Self::DateTime { kind, format, .. } => {
                let format = format.clone();
                match kind {
                    DateTimeKind::Date => MatchingRule::Date { format },
                    DateTimeKind::Time => MatchingRule::Time { format },
                    DateTimeKind::DateTime => MatchingRule::Timestamp { format },
                }
            }
            Self::Struct(_) => return None,
        };
        Some(rule)
    }

    /// The generator attached to this matcher's path, if any.
    #[must_use]
    pub fn generator(&self) -> Option<Generator> {
        match self {
            Self::FromProviderState { expression, .. } => Some(Generator::ProviderState {
                expression: expression.clone(),
            }),
            Self::DateTime { kind, format, .. } => {
                let format = format.clone();
                Some(match kind {
                    DateTimeKind::Date => Generator::Date { format },
                    DateTimeKind::Time => Generator::Time { format },
                    DateTimeKind::DateTime => Generator::DateTime { format },
                })
            }
            _ => None,
        }
    }

    /// The oldest specification version able to express this matcher.
    #[must_use]
    pub const fn specification(&self) -> SpecificationVersion {
        self.class().specification()
    }
}

/// Number of example elements shown for a bounded array.
///
/// The larger bound wins, so the example shows the maximum cardinality.
pub(crate) const fn repetitions(min: usize, max: usize) -> usize {
    if max > min { max } else { min }
}

fn clamp_min(min: i64) -> usize {
    if min < 1 {
        warn!(min, "min value to an array matcher can't be less than one, using 1");
        return 1;
    }
    usize::try_from(min).unwrap_or(usize::MAX)
}

/// Match on type rather than value.
pub fn like(content: impl Into<Template>) -> Matcher {
    Matcher::Like(content.into())
}

/// Match a string against `regex`, showing `example` in the body.
pub fn term(example: impl Into<String>, regex: impl Into<String>) -> Matcher {
    Matcher::Regex {
        example: example.into(),
        regex: regex.into(),
    }
}

/// Alias of [`term`].
pub fn regex(example: impl Into<String>, pattern: impl Into<String>) -> Matcher {
    term(example, pattern)
}

/// An array with at least `min` elements shaped like `content`.
///
/// `min` below 1 is corrected to 1 with a warning.
pub fn each_like(content: impl Into<Template>, min: i64) -> Matcher {
    Matcher::EachLike {
        content: content.into(),
        min: clamp_min(min),
    }
}

/// Alias of [`each_like`].
pub fn array_min_like(content: impl Into<Template>, min: i64) -> Matcher {
    each_like(content, min)
}

/// An array with between 1 and `max` elements shaped like `content`.
pub fn array_max_like(content: impl Into<Template>, max: usize) -> Matcher {
    array_min_max_like(content, 1, max)
}

/// An array with between `min` and `max` elements shaped like `content`.
///
/// The example shows `max` elements. `min` below 1 is corrected to 1.
pub fn array_min_max_like(content: impl Into<Template>, min: i64, max: usize) -> Matcher {
    let min = clamp_min(min);
    if max < min {
        warn!(min, max, "max value of an array matcher is below its min");
    }
    Matcher::ArrayMinMaxLike {
        content: content.into(),
        min,
        max,
    }
}

/// Any integer, shown as `example`.
#[must_use]
pub const fn integer(example: i64) -> Matcher {
    Matcher::Integer(example)
}

/// Any decimal, shown as `example`.
#[must_use]
pub const fn decimal(example: f64) -> Matcher {
    Matcher::Decimal(example)
}

/// Only `null`.
#[must_use]
pub const fn null() -> Matcher {
    Matcher::Null
}

/// Exact equality, resetting any cascading type match.
pub fn equality(content: impl Into<Template>) -> Matcher {
    Matcher::Equality(content.into())
}

/// A string containing `value`.
pub fn includes(value: impl Into<String>) -> Matcher {
    Matcher::Includes(value.into())
}

/// An array that contains, in any order, an element matching each variant.
pub fn array_containing<V, I>(variants: I) -> Matcher
where
    V: Into<Template>,
    I: IntoIterator<Item = V>,
{
    Matcher::ArrayContaining(variants.into_iter().map(Into::into).collect())
}

/// A map whose keys are ignored and whose values all match `template`.
///
/// `key` only names the entry shown in the example body.
pub fn each_key_like(key: impl Into<String>, template: impl Into<Template>) -> Matcher {
    Matcher::EachKeyLike {
        key: key.into(),
        template: template.into(),
    }
}

/// A value injected from provider state through `expression`.
pub fn from_provider_state(expression: impl Into<String>, example: impl Into<Value>) -> Matcher {
    Matcher::FromProviderState {
        expression: expression.into(),
        example: example.into(),
    }
}

/// A date in `format`, regenerated at verification time.
pub fn date_generated(example: impl Into<String>, format: impl Into<String>) -> Matcher {
    date_time_matcher(DateTimeKind::Date, example, format)
}

/// A time in `format`, regenerated at verification time.
pub fn time_generated(example: impl Into<String>, format: impl Into<String>) -> Matcher {
    date_time_matcher(DateTimeKind::Time, example, format)
}

/// A date-time in `format`, regenerated at verification time.
pub fn date_time_generated(example: impl Into<String>, format: impl Into<String>) -> Matcher {
    date_time_matcher(DateTimeKind::DateTime, example, format)
}

fn date_time_matcher(
    kind: DateTimeKind,
    example: impl Into<String>,
    format: impl Into<String>,
) -> Matcher {
    Matcher::DateTime {
        kind,
        example: example.into(),
        format: format.into(),
    }
}

/// An object whose fields may hold matchers.
pub fn struct_matcher<K, V, I>(fields: I) -> Matcher
where
    K: Into<String>,
    V: Into<Template>,
    I: IntoIterator<Item = (K, V)>,
{
    Matcher::Struct(
        fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect(),
    )
}
