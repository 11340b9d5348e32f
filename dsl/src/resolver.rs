//! Turns a [`Template`] into a body plus path-aligned rules and generators.
//!
//! One walk serves every specification version. Rules are recorded in one
//! internal shape and rendered per version afterwards; see
//! [`MatchingRules::render`].
//!
//! Array elements and cardinality content are walked through the same
//! recursion as object fields: the walker appends the `[i]` or `[*]` suffix
//! itself and recurses with a synthetic key, which [`path::extend`] ignores.

use crate::matchers::Matcher;
use crate::rules::{ArrayContainsVariant, Generator, Generators, MatchingRules, RenderedRules};
use crate::{PactResult, SpecificationVersion, Template, path, validation};
use pact_common::is_json_formatted_object;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{trace, warn};

/// Synthetic key under which cardinality content is resolved.
const ELEMENT_KEY: &str = "0";

/// The artifacts of one resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Example body with every matcher replaced by its example
    pub body: Value,
    /// Rules keyed by path
    pub rules: MatchingRules,
    /// Generators keyed by path
    pub generators: Generators,
}

impl Resolution {
    /// Rules in the shape `version` expects.
    #[must_use]
    pub fn matching_rules(&self, version: SpecificationVersion) -> RenderedRules {
        self.rules.render(version)
    }

    /// Generators keyed by path.
    #[must_use]
    pub fn rendered_generators(&self) -> BTreeMap<String, Generator> {
        self.generators.render()
    }
}

/// Validate `template` against `version`, then resolve it below `root`.
///
/// `root` is the path of the template itself, `$` for a standalone body or
/// `$.body` for a v2 interaction body.
///
/// # Errors
///
/// [`crate::PactError::SpecificationMismatch`] if the template uses matchers
/// newer than `version`. Once validation passes, resolution cannot fail.
pub fn resolve(
    version: SpecificationVersion,
    root: &str,
    template: &Template,
) -> PactResult<Resolution> {
    validation::validate(version, template)?;
    Ok(resolve_unchecked(root, template))
}

/// Resolve `template` below `root` without checking specification versions.
#[must_use]
pub fn resolve_unchecked(root: &str, template: &Template) -> Resolution {
    if let Template::Literal(Value::String(body)) = template {
        if is_json_formatted_object(body) {
            warn!("string body looks like a JSON object, it will be sent as a JSON string");
        }
    }

    let mut walker = Walker::default();
    let body = walker.resolve("", template, root);
    Resolution {
        body,
        rules: walker.rules,
        generators: walker.generators,
    }
}

/// Resolve each `arrayContaining` variant in isolation, rooted at `$`.
pub(crate) fn resolve_variants(variants: &[Template]) -> Vec<ArrayContainsVariant> {
    variants
        .iter()
        .enumerate()
        .map(|(index, variant)| {
            let resolution = resolve_unchecked(path::ROOT, variant);
            ArrayContainsVariant {
                index,
                rules: resolution.rules.rule_sets(),
                generators: resolution.generators.render(),
            }
        })
        .collect()
}

/// Accumulators for one walk.
#[derive(Default)]
struct Walker {
    rules: MatchingRules,
    generators: Generators,
}

impl Walker {
    fn resolve(&mut self, key: &str, template: &Template, parent: &str) -> Value {
        let here = path::extend(parent, key);

        match template {
            Template::Literal(value) => value.clone(),
            Template::Object(fields) => self.resolve_fields(fields, &here),
            Template::Array(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.resolve("", item, &path::index(&here, i)))
                    .collect(),
            ),
            Template::Matcher(matcher) => self.resolve_matcher(matcher, &here),
        }
    }

    fn resolve_fields(&mut self, fields: &BTreeMap<String, Template>, here: &str) -> Value {
        Value::Object(
            fields
                .iter()
                .map(|(key, value)| (key.clone(), self.resolve(key, value, here)))
                .collect(),
        )
    }

    fn resolve_matcher(&mut self, matcher: &Matcher, here: &str) -> Value {
        trace!(path = here, class = %matcher.class(), "resolving matcher");

        if let Some(rule) = matcher.matching_rule() {
            self.rules.insert(here, rule);
        }
        if let Some(generator) = matcher.generator() {
            self.generators.insert(here, generator);
        }

        match matcher {
            Matcher::Like(content) | Matcher::Equality(content) => self.resolve("", content, here),
            Matcher::EachLike { content, min } => self.repeat(content, *min, here),
            Matcher::ArrayMinMaxLike { content, min, max } => {
                self.repeat(content, crate::matchers::repetitions(*min, *max), here)
            }
            Matcher::EachKeyLike { key, template } => {
                let value = self.resolve("", template, &path::each_value(here));
                Value::Object(std::iter::once((key.clone(), value)).collect())
            }
            Matcher::Struct(fields) => self.resolve_fields(fields, here),
            Matcher::Regex { .. }
            | Matcher::Integer(_)
            | Matcher::Decimal(_)
            | Matcher::Null
            | Matcher::Includes(_)
            | Matcher::ArrayContaining(_)
            | Matcher::FromProviderState { .. }
            | Matcher::DateTime { .. } => matcher.example(),
        }
    }

    /// Resolve `content` once at `here[*]` and repeat it `count` times.
    fn repeat(&mut self, content: &Template, count: usize, here: &str) -> Value {
        let element = self.resolve(ELEMENT_KEY, content, &path::wildcard(here));
        Value::Array(vec![element; count])
    }
}
