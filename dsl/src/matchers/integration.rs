//! Integration JSON: matchers serialized with their `pact:` markers.
//!
//! This is the form the native engine consumes, and the form the validation
//! pre-pass scans. A matcher becomes
//! `{"pact:matcher:type": .., "pact:specification": .., "value": ..}` plus
//! whatever attributes its rule needs. Struct containers serialize as plain
//! objects.

use super::{DateTimeKind, Matcher, repetitions};
use crate::Template;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Key carrying the rule type.
pub const MATCHER_TYPE_KEY: &str = "pact:matcher:type";
/// Key carrying the minimum specification version.
pub const SPECIFICATION_KEY: &str = "pact:specification";
/// Key carrying the generator type.
pub const GENERATOR_TYPE_KEY: &str = "pact:generator:type";

/// `content` repeated `count` times, serialized as an array.
struct Repeated<'a>(&'a Template, usize);

impl Serialize for Repeated<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(std::iter::repeat_n(self.0, self.1))
    }
}

impl DateTimeKind {
    const fn generator_type(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Time => "Time",
            Self::DateTime => "DateTime",
        }
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Matcher(matcher) => matcher.serialize(serializer),
            Self::Object(fields) => fields.serialize(serializer),
            Self::Array(items) => items.serialize(serializer),
            Self::Literal(value) => value.serialize(serializer),
        }
    }
}

impl Serialize for Matcher {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Self::Struct(fields) = self {
            return fields.serialize(serializer);
        }

        let class = self.class();
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(MATCHER_TYPE_KEY, class.matcher_type())?;
        map.serialize_entry(SPECIFICATION_KEY, class.specification().as_str())?;

        match self {
            Self::Like(content) | Self::Equality(content) => {
                map.serialize_entry("value", content)?;
            }
            Self::Regex { example, regex } => {
                map.serialize_entry("value", example)?;
                map.serialize_entry("regex", regex)?;
            }
            Self::EachLike { content, min } => {
                map.serialize_entry("min", min)?;
                map.serialize_entry("value", &Repeated(content, *min))?;
            }
            Self::ArrayMinMaxLike { content, min, max } => {
                map.serialize_entry("min", min)?;
                map.serialize_entry("max", max)?;
                map.serialize_entry("value", &Repeated(content, repetitions(*min, *max)))?;
            }
            Self::Integer(n) => map.serialize_entry("value", n)?,
            Self::Decimal(x) => map.serialize_entry("value", x)?,
            Self::Null => {}
            Self::Includes(value) => map.serialize_entry("value", value)?,
            Self::ArrayContaining(variants) => map.serialize_entry("variants", variants)?,
            Self::EachKeyLike { key, template } => {
                let example: BTreeMap<&str, &Template> = BTreeMap::from([(key.as_str(), template)]);
                map.serialize_entry("value", &example)?;
            }
            Self::FromProviderState {
                expression,
                example,
            } => {
                map.serialize_entry(GENERATOR_TYPE_KEY, "ProviderState")?;
                map.serialize_entry("expression", expression)?;
                map.serialize_entry("value", example)?;
            }
            Self::DateTime {
                kind,
                example,
                format,
            } => {
                map.serialize_entry(GENERATOR_TYPE_KEY, kind.generator_type())?;
                map.serialize_entry("format", format)?;
                map.serialize_entry("value", example)?;
            }
            Self::Struct(_) => {}
        }

        map.end()
    }
}
