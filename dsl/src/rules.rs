//! Matching rules, generators and their wire renderings.
//!
//! The resolver records at most one [`MatchingRule`] and one [`Generator`]
//! per path. The same recorded set renders as flat v2 rules or as v3 rule
//! sets; see [`MatchingRules::render`].

use crate::SpecificationVersion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One comparison strategy applied at one path.
///
/// Serializes with the `match` discriminant used by contract files, for
/// example `{"match":"type","min":2}` or `{"match":"regex","regex":"\\d+"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "match", rename_all = "camelCase")]
pub enum MatchingRule {
    /// Match on type, optionally bounding array cardinality
    Type {
        /// Minimum number of array elements
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        /// Maximum number of array elements
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
    },
    /// Match against a regular expression
    Regex {
        /// The pattern, checked by the verification engine
        regex: String,
    },
    /// Any integer
    Integer,
    /// Any decimal
    Decimal,
    /// Only `null`
    Null,
    /// Exact match, resetting any cascading type match
    Equality,
    /// The actual string contains `value`
    Include {
        /// Required substring
        value: String,
    },
    /// Every value of a map matches the template, whatever its key
    Values,
    /// Every variant matches at least one actual element
    ArrayContains {
        /// Per-variant rules and generators
        variants: Vec<ArrayContainsVariant>,
    },
    /// A date in the given format
    Date {
        /// Date format pattern
        format: String,
    },
    /// A time in the given format
    Time {
        /// Time format pattern
        format: String,
    },
    /// A date-time in the given format
    Timestamp {
        /// Date-time format pattern
        format: String,
    },
}

impl MatchingRule {
    /// Plain type match.
    #[must_use]
    pub const fn type_match() -> Self {
        Self::Type {
            min: None,
            max: None,
        }
    }

    /// Type match with a minimum cardinality.
    #[must_use]
    pub const fn min_type(min: usize) -> Self {
        Self::Type {
            min: Some(min),
            max: None,
        }
    }

    /// Type match with both cardinality bounds.
    #[must_use]
    pub const fn min_max_type(min: usize, max: usize) -> Self {
        Self::Type {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// One variant of an `arrayContains` rule.
///
/// Variant rules are always in rule-set form: the matcher only exists from
/// specification v3 on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayContainsVariant {
    /// Index of the variant's example in the body array
    pub index: usize,
    /// Rules relative to the variant root `$`
    pub rules: BTreeMap<String, RuleSet>,
    /// Generators relative to the variant root `$`
    #[serde(default)]
    pub generators: BTreeMap<String, Generator>,
}

/// How the matchers of a [`RuleSet`] combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Combine {
    /// All matchers must pass
    #[default]
    And,
    /// Any matcher may pass
    Or,
}

/// A v3 rule set: `{"combine":"AND","matchers":[..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Combination logic
    pub combine: Combine,
    /// Rules in the set
    pub matchers: Vec<MatchingRule>,
}

impl RuleSet {
    /// Wrap a single rule in an `AND` set.
    #[must_use]
    pub fn and(rule: MatchingRule) -> Self {
        Self {
            combine: Combine::And,
            matchers: vec![rule],
        }
    }
}

/// A generator producing a fresh value at verification time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Generator {
    /// Current date in `format`
    Date {
        /// Date format pattern
        format: String,
    },
    /// Current time in `format`
    Time {
        /// Time format pattern
        format: String,
    },
    /// Current date-time in `format`
    DateTime {
        /// Date-time format pattern
        format: String,
    },
    /// Value looked up from provider-state parameters
    ProviderState {
        /// Expression evaluated against the provider-state parameters
        expression: String,
    },
}

/// Rules recorded by one resolution, keyed by path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchingRules {
    rules: BTreeMap<String, MatchingRule>,
}

/// Matching rules in the shape a specification version expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RenderedRules {
    /// v2: `{path: rule}`
    Flat(BTreeMap<String, MatchingRule>),
    /// v3 and later: `{path: {combine, matchers}}`
    Combined(BTreeMap<String, RuleSet>),
}

impl RenderedRules {
    /// Number of paths carrying a rule.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(rules) => rules.len(),
            Self::Combined(rules) => rules.len(),
        }
    }

    /// Whether no path carries a rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MatchingRules {
    /// Record `rule` at `path`, replacing any earlier rule there.
    pub fn insert(&mut self, path: impl Into<String>, rule: MatchingRule) {
        self.rules.insert(path.into(), rule);
    }

    /// The rule recorded at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&MatchingRule> {
        self.rules.get(path)
    }

    /// Iterate rules in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MatchingRule)> {
        self.rules.iter()
    }

    /// Number of recorded rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render for the given specification version.
    #[must_use]
    pub fn render(&self, version: SpecificationVersion) -> RenderedRules {
        if version.uses_rule_sets() {
            RenderedRules::Combined(self.rule_sets())
        } else {
            RenderedRules::Flat(self.rules.clone())
        }
    }

    /// Rules wrapped in singleton `AND` rule sets.
    #[must_use]
    pub fn rule_sets(&self) -> BTreeMap<String, RuleSet> {
        self.rules
            .iter()
            .map(|(path, rule)| (path.clone(), RuleSet::and(rule.clone())))
            .collect()
    }
}

/// Generators recorded by one resolution, keyed by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generators {
    generators: BTreeMap<String, Generator>,
}

impl Generators {
    /// Record `generator` at `path`.
    pub fn insert(&mut self, path: impl Into<String>, generator: Generator) {
        self.generators.insert(path.into(), generator);
    }

    /// The generator recorded at `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Generator> {
        self.generators.get(path)
    }

    /// Iterate generators in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Generator)> {
        self.generators.iter()
    }

    /// Number of recorded generators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Generators keyed by path; the shape is the same for every version.
    #[must_use]
    pub fn render(&self) -> BTreeMap<String, Generator> {
        self.generators.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_wire_format() {
        let cases = vec![
            (MatchingRule::type_match(), json!({"match": "type"})),
            (MatchingRule::min_type(3), json!({"match": "type", "min": 3})),
            (
                MatchingRule::min_max_type(1, 4),
                json!({"match": "type", "min": 1, "max": 4}),
            ),
            (
                MatchingRule::Regex {
                    regex: "\\d+".to_string(),
                },
                json!({"match": "regex", "regex": "\\d+"}),
            ),
            (MatchingRule::Equality, json!({"match": "equality"})),
            (
                MatchingRule::Include {
                    value: "foo".to_string(),
                },
                json!({"match": "include", "value": "foo"}),
            ),
            (MatchingRule::Values, json!({"match": "values"})),
            (
                MatchingRule::Timestamp {
                    format: "yyyy".to_string(),
                },
                json!({"match": "timestamp", "format": "yyyy"}),
            ),
        ];

        for (rule, expected) in cases {
            assert_eq!(serde_json::to_value(&rule).unwrap(), expected);
        }
    }

    #[test]
    fn test_rule_deserialization() {
        let rule: MatchingRule = serde_json::from_value(json!({"match": "type", "max": 2})).unwrap();
        assert_eq!(
            rule,
            MatchingRule::Type {
                min: None,
                max: Some(2)
            }
        );
    }

    #[test]
    fn test_generator_wire_format() {
        let generator = Generator::ProviderState {
            expression: "${id}".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&generator).unwrap(),
            json!({"type": "ProviderState", "expression": "${id}"})
        );

        let generator = Generator::DateTime {
            format: "yyyy-MM-dd'T'HH:mm".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&generator).unwrap(),
            json!({"type": "DateTime", "format": "yyyy-MM-dd'T'HH:mm"})
        );
    }

    #[test]
    fn test_render_v2_flat() {
        let mut rules = MatchingRules::default();
        rules.insert("$.body.id", MatchingRule::type_match());

        let rendered = serde_json::to_value(rules.render(SpecificationVersion::V2)).unwrap();
        assert_eq!(rendered, json!({"$.body.id": {"match": "type"}}));
    }

    #[test]
    fn test_render_v3_combined() {
        let mut rules = MatchingRules::default();
        rules.insert("$.id", MatchingRule::min_type(2));

        for version in [SpecificationVersion::V3, SpecificationVersion::V4] {
            let rendered = serde_json::to_value(rules.render(version)).unwrap();
            assert_eq!(
                rendered,
                json!({"$.id": {"combine": "AND", "matchers": [{"match": "type", "min": 2}]}})
            );
        }
    }

    #[test]
    fn test_empty_render() {
        let rules = MatchingRules::default();
        assert!(rules.render(SpecificationVersion::V2).is_empty());
        assert!(rules.render(SpecificationVersion::V3).is_empty());
    }
}
