//! The value graph handed to the resolver.
//!
//! A [`Template`] is any mix of literal JSON, containers and [`Matcher`]
//! nodes. Literal JSON (including nested objects and arrays) never produces
//! rules; only matcher nodes do.

use crate::matchers::Matcher;
use serde_json::Value;
use std::collections::BTreeMap;

/// An example value, possibly annotated with matchers at any depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// A matcher node
    Matcher(Box<Matcher>),
    /// An object whose fields may hold matchers
    Object(BTreeMap<String, Template>),
    /// An array whose elements may hold matchers
    Array(Vec<Template>),
    /// Plain JSON, copied into the body verbatim
    Literal(Value),
}

impl Template {
    /// Build an object template from `(key, value)` pairs.
    pub fn object<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Self>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build an array template.
    pub fn array<V, I>(items: I) -> Self
    where
        V: Into<Self>,
        I: IntoIterator<Item = V>,
    {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// The JSON `null` literal.
    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Value::Null)
    }

    /// Whether any matcher node occurs in this template.
    #[must_use]
    pub fn contains_matchers(&self) -> bool {
        match self {
            Self::Matcher(_) => true,
            Self::Object(fields) => fields.values().any(Self::contains_matchers),
            Self::Array(items) => items.iter().any(Self::contains_matchers),
            Self::Literal(_) => false,
        }
    }

    /// The example value with every matcher replaced by its example.
    ///
    /// Equivalent to the body the resolver produces, without recording rules.
    #[must_use]
    pub fn example(&self) -> Value {
        match self {
            Self::Matcher(matcher) => matcher.example(),
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.example()))
                    .collect(),
            ),
            Self::Array(items) => Value::Array(items.iter().map(Self::example).collect()),
            Self::Literal(value) => value.clone(),
        }
    }
}

impl From<Matcher> for Template {
    fn from(matcher: Matcher) -> Self {
        Self::Matcher(Box::new(matcher))
    }
}

impl From<Value> for Template {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<BTreeMap<String, Self>> for Template {
    fn from(fields: BTreeMap<String, Self>) -> Self {
        Self::Object(fields)
    }
}

impl From<Vec<Self>> for Template {
    fn from(items: Vec<Self>) -> Self {
        Self::Array(items)
    }
}

impl From<&str> for Template {
    fn from(value: &str) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<String> for Template {
    fn from(value: String) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<bool> for Template {
    fn from(value: bool) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<f64> for Template {
    fn from(value: f64) -> Self {
        Self::Literal(Value::from(value))
    }
}

macro_rules! literal_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Template {
                fn from(value: $ty) -> Self {
                    Self::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

impl<T: Into<Self>> From<Option<T>> for Template {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{each_like, like};
    use serde_json::json;

    #[test]
    fn test_literal_conversions() {
        assert_eq!(Template::from("a"), Template::Literal(json!("a")));
        assert_eq!(Template::from(3_u8), Template::Literal(json!(3)));
        assert_eq!(Template::from(None::<i32>), Template::null());
        assert_eq!(Template::from(json!({"a": 1})), Template::Literal(json!({"a": 1})));
    }

    #[test]
    fn test_contains_matchers() {
        let plain = Template::object([("a", Template::array([1, 2]))]);
        assert!(!plain.contains_matchers());

        let nested = Template::object([("a", Template::array([Template::from(like(1))]))]);
        assert!(nested.contains_matchers());
    }

    #[test]
    fn test_example() {
        let template = Template::object([
            ("name", Template::from(like("Fred"))),
            ("ids", Template::from(each_like(7, 2))),
        ]);

        assert_eq!(template.example(), json!({"name": "Fred", "ids": [7, 7]}));
    }
}
