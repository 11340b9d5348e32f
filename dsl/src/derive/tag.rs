//! The `pact` field annotation.
//!
//! An annotation is a comma-separated list of `key=value` tokens:
//!
//! | Key         | Applies to | Meaning |
//! |-------------|------------|---------|
//! | `example`   | scalars    | Example value, parsed per kind |
//! | `regex`     | strings    | Pattern; consumes the rest of the annotation |
//! | `min`       | sequences  | Minimum length |
//! | `max`       | sequences  | Maximum length |
//! | `format`    | strings    | Date/time format for `generator` |
//! | `generator` | strings    | `date`, `time` or `datetime` |
//!
//! A comma only separates tokens when a recognized `key=` follows it, so
//! `example=Hello, world` keeps the whole remainder as its example. `regex`
//! consumes the rest of the annotation and must come last.

use crate::matchers::DateTimeKind;
use crate::{PactError, PactResult};
use std::fmt;

/// A recognized annotation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKey {
    /// `example=`
    Example,
    /// `regex=`
    Regex,
    /// `min=`
    Min,
    /// `max=`
    Max,
    /// `format=`
    Format,
    /// `generator=`
    Generator,
}

impl TagKey {
    fn parse(key: &str) -> Option<Self> {
        match key {
            "example" => Some(Self::Example),
            "regex" => Some(Self::Regex),
            "min" => Some(Self::Min),
            "max" => Some(Self::Max),
            "format" => Some(Self::Format),
            "generator" => Some(Self::Generator),
            _ => None,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Example => "example",
            Self::Regex => "regex",
            Self::Min => "min",
            Self::Max => "max",
            Self::Format => "format",
            Self::Generator => "generator",
        }
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    raw: String,
    /// Example, still unparsed: its type depends on the field kind
    pub example: Option<String>,
    /// Regular expression
    pub regex: Option<String>,
    /// Minimum sequence length
    pub min: Option<i64>,
    /// Maximum sequence length
    pub max: Option<usize>,
    /// Generator format
    pub format: Option<String>,
    /// Generator kind
    pub generator: Option<DateTimeKind>,
}

impl Tag {
    /// Parse an annotation.
    ///
    /// # Errors
    ///
    /// [`PactError::InvalidTag`] for unknown or repeated keys, tokens
    /// without `=`, unparseable numbers, an empty `example` or `regex`, a
    /// `regex` without an `example`, and a `generator` without both a
    /// `format` and an `example` (or the reverse).
    pub fn parse(raw: &str) -> PactResult<Self> {
        let mut tag = Self {
            raw: raw.to_string(),
            ..Self::default()
        };

        let mut rest = raw.trim();
        while !rest.is_empty() {
            let (token, remainder) = next_token(rest);
            tag.set(token)?;
            rest = remainder.trim_start();
        }

        tag.check()?;
        Ok(tag)
    }

    /// Keys present in this annotation.
    #[must_use]
    pub fn keys(&self) -> Vec<TagKey> {
        [
            (TagKey::Example, self.example.is_some()),
            (TagKey::Regex, self.regex.is_some()),
            (TagKey::Min, self.min.is_some()),
            (TagKey::Max, self.max.is_some()),
            (TagKey::Format, self.format.is_some()),
            (TagKey::Generator, self.generator.is_some()),
        ]
        .into_iter()
        .filter_map(|(key, present)| present.then_some(key))
        .collect()
    }

    /// Fail if any key outside `allowed` is present.
    ///
    /// # Errors
    ///
    /// [`PactError::InvalidTag`] naming the first such key and `kind`.
    pub fn ensure_only(&self, allowed: &[TagKey], kind: &str) -> PactResult<()> {
        match self.keys().into_iter().find(|key| !allowed.contains(key)) {
            Some(key) => Err(self.error(format!("`{key}` does not apply to a {kind} field"))),
            None => Ok(()),
        }
    }

    /// Parse the example as `T`, if present.
    ///
    /// # Errors
    ///
    /// [`PactError::InvalidTag`] if the example does not parse as `T`.
    pub fn example_as<T>(&self, kind: &str) -> PactResult<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: fmt::Display,
    {
        self.example
            .as_deref()
            .map(|example| {
                example
                    .trim()
                    .parse::<T>()
                    .map_err(|e| self.error(format!("example {example:?} is not a {kind}: {e}")))
            })
            .transpose()
    }

    fn set(&mut self, token: &str) -> PactResult<()> {
        let Some((key, value)) = token.split_once('=') else {
            return Err(self.error(format!("expected key=value, found {token:?}")));
        };
        let key = key.trim();
        let Some(key) = TagKey::parse(key) else {
            return Err(self.error(format!("unknown key {key:?}")));
        };
        if self.keys().contains(&key) {
            return Err(self.error(format!("`{key}` given more than once")));
        }

        match key {
            TagKey::Example => self.example = Some(value.to_string()),
            TagKey::Regex => self.regex = Some(value.to_string()),
            TagKey::Min => self.min = Some(self.number(key, value)?),
            TagKey::Max => self.max = Some(self.number(key, value)?),
            TagKey::Format => self.format = Some(value.to_string()),
            TagKey::Generator => {
                self.generator = Some(match value.trim() {
                    "date" => DateTimeKind::Date,
                    "time" => DateTimeKind::Time,
                    "datetime" => DateTimeKind::DateTime,
                    other => return Err(self.error(format!("unknown generator {other:?}"))),
                });
            }
        }
        Ok(())
    }

    fn number<T>(&self, key: TagKey, value: &str) -> PactResult<T>
    where
        T: std::str::FromStr,
        T::Err: fmt::Display,
    {
        value
            .trim()
            .parse()
            .map_err(|e| self.error(format!("`{key}` must be a number: {e}")))
    }

    fn check(&self) -> PactResult<()> {
        if self.example.as_deref().is_some_and(|e| e.trim().is_empty()) {
            return Err(self.error("example must not be empty"));
        }
        if let Some(regex) = &self.regex {
            if regex.is_empty() {
                return Err(self.error("regex must not be empty"));
            }
            if self.example.is_none() {
                return Err(self.error("regex requires an example"));
            }
            if self.generator.is_some() {
                return Err(self.error("regex cannot be combined with a generator"));
            }
        }
        match (&self.generator, &self.format) {
            (Some(_), None) => Err(self.error("generator requires a format")),
            (None, Some(_)) => Err(self.error("format requires a generator")),
            (Some(_), Some(_)) if self.example.is_none() => {
                Err(self.error("generator requires an example"))
            }
            _ => Ok(()),
        }
    }

    fn error(&self, reason: impl Into<String>) -> PactError {
        PactError::invalid_tag(&self.raw, reason)
    }
}

/// Split off the first token, keeping commas not followed by `key=`.
fn next_token(rest: &str) -> (&str, &str) {
    if rest.starts_with("regex=") {
        return (rest, "");
    }

    let mut from = 0;
    while let Some(offset) = rest[from..].find(',') {
        let comma = from + offset;
        let next = &rest[comma + 1..];
        if starts_with_key(next) {
            return (&rest[..comma], next);
        }
        from = comma + 1;
    }
    (rest, "")
}

fn starts_with_key(token: &str) -> bool {
    token
        .split_once('=')
        .is_some_and(|(key, _)| TagKey::parse(key.trim()).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_example_and_regex() {
        let tag = Tag::parse(r"example=2000-01-01,regex=^\d{4}-\d{2}-\d{2}$").unwrap();
        assert_eq!(tag.example.as_deref(), Some("2000-01-01"));
        assert_eq!(tag.regex.as_deref(), Some(r"^\d{4}-\d{2}-\d{2}$"));
        assert_eq!(tag.keys(), vec![TagKey::Example, TagKey::Regex]);
    }

    #[test]
    fn test_regex_consumes_commas() {
        let tag = Tag::parse(r"example=aa,regex=^a{1,3}$").unwrap();
        assert_eq!(tag.regex.as_deref(), Some("^a{1,3}$"));
    }

    #[test]
    fn test_example_keeps_commas() {
        let tag = Tag::parse("example=Hello, world").unwrap();
        assert_eq!(tag.example.as_deref(), Some("Hello, world"));

        let tag = Tag::parse(r"example=a, b,regex=^\w, \w$").unwrap();
        assert_eq!(tag.example.as_deref(), Some("a, b"));
        assert_eq!(tag.regex.as_deref(), Some(r"^\w, \w$"));

        let tag = Tag::parse("example=1,2, min=3").unwrap();
        assert_eq!(tag.example.as_deref(), Some("1,2"));
        assert_eq!(tag.min, Some(3));
    }

    #[test]
    fn test_parse_bounds() {
        let tag = Tag::parse("min=2, max=5").unwrap();
        assert_eq!(tag.min, Some(2));
        assert_eq!(tag.max, Some(5));
    }

    #[test]
    fn test_parse_generator() {
        let tag = Tag::parse("example=2000-01-01,format=yyyy-MM-dd,generator=date").unwrap();
        assert_eq!(tag.generator, Some(DateTimeKind::Date));
        assert_eq!(tag.format.as_deref(), Some("yyyy-MM-dd"));
    }

    #[test]
    fn test_malformed_tags() {
        let cases = [
            "example=",
            "example=  ",
            "regex=^a$",
            "example=a,regex=",
            "min=two",
            "max=-1",
            "colour=red",
            "example",
            "example=a,example=b",
            "format=yyyy",
            "example=x,generator=date",
            "format=yyyy,generator=date",
            "example=x,format=y,generator=week",
            "example=x,format=y,generator=date,regex=x",
        ];

        for raw in cases {
            let err = Tag::parse(raw).unwrap_err();
            assert!(err.is_configuration_error(), "{raw}: {err}");
            assert!(err.to_string().contains(raw), "{raw}: {err}");
        }
    }

    #[test]
    fn test_ensure_only() {
        let tag = Tag::parse("min=2").unwrap();
        assert!(tag.ensure_only(&[TagKey::Min, TagKey::Max], "sequence").is_ok());

        let err = tag.ensure_only(&[TagKey::Example], "string").unwrap_err();
        assert!(err.to_string().contains("`min` does not apply to a string field"));
    }

    #[test]
    fn test_example_as() {
        let tag = Tag::parse("example=0").unwrap();
        assert_eq!(tag.example_as::<i64>("integer").unwrap(), Some(0));
        assert!(tag.example_as::<bool>("bool").is_err());
        assert_eq!(Tag::default().example_as::<f64>("float").unwrap(), None);
    }
}
