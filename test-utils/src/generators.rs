//! Shared proptest generators.
//!
//! Template strategies only produce field names that start with a letter, so
//! every generated key contributes a path segment.

use pact_dsl::matchers::{
    array_containing, array_min_max_like, date_generated, decimal, each_key_like, each_like,
    equality, from_provider_state, includes, integer, like, null, term,
};
use pact_dsl::{Matcher, SpecificationVersion, Template};
use proptest::prelude::*;
use serde_json::Value;

/// Generate any specification version.
pub fn spec_version_strategy() -> impl Strategy<Value = SpecificationVersion> {
    prop_oneof![
        Just(SpecificationVersion::V2),
        Just(SpecificationVersion::V3),
        Just(SpecificationVersion::V4),
    ]
}

/// Generate object field names.
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z_]{0,8}"
}

/// Generate scalar JSON literals.
pub fn literal_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-1000_i64..1000).prop_map(Value::from),
        "[a-z ]{0,12}".prop_map(Value::from),
    ]
}

/// Generate array minimums, including values that get clamped.
pub fn min_strategy() -> impl Strategy<Value = i64> {
    -3_i64..5
}

fn v2_leaf_strategy() -> impl Strategy<Value = Template> {
    prop_oneof![
        literal_strategy().prop_map(Template::from),
        literal_strategy().prop_map(|v| Template::from(like(v))),
        "[0-9]{1,4}".prop_map(|digits| Template::from(term(digits, r"^\d+$"))),
    ]
}

fn v3_leaf_strategy() -> impl Strategy<Value = Template> {
    prop_oneof![
        v2_leaf_strategy(),
        (-1000_i64..1000).prop_map(|n| Template::from(integer(n))),
        (-1000.0_f64..1000.0).prop_map(|x| Template::from(decimal(x))),
        Just(Template::from(null())),
        "[a-z]{1,6}".prop_map(|s| Template::from(includes(s))),
        literal_strategy().prop_map(|v| Template::from(equality(v))),
        (1_i64..100).prop_map(|id| Template::from(from_provider_state("${id}", id))),
        Just(Template::from(date_generated("2000-02-01", "yyyy-MM-dd"))),
    ]
}

/// Generate templates using only matchers a v2 contract can express.
pub fn v2_template_strategy() -> impl Strategy<Value = Template> {
    v2_leaf_strategy().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::btree_map(field_name_strategy(), inner.clone(), 0..4)
                .prop_map(Template::Object),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Template::Array),
            inner.clone().prop_map(|t| Template::from(like(t))),
            (inner.clone(), min_strategy()).prop_map(|(t, min)| Template::from(each_like(t, min))),
            prop::collection::btree_map(field_name_strategy(), inner, 0..4)
                .prop_map(|fields| Template::from(Matcher::Struct(fields))),
        ]
    })
}

/// Generate templates using any matcher.
pub fn template_strategy() -> impl Strategy<Value = Template> {
    v3_leaf_strategy().prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            prop::collection::btree_map(field_name_strategy(), inner.clone(), 0..4)
                .prop_map(Template::Object),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Template::Array),
            inner.clone().prop_map(|t| Template::from(like(t))),
            (inner.clone(), min_strategy()).prop_map(|(t, min)| Template::from(each_like(t, min))),
            (inner.clone(), min_strategy(), 0_usize..5).prop_map(|(t, min, max)| {
                Template::from(array_min_max_like(t, min, max))
            }),
            (field_name_strategy(), inner.clone())
                .prop_map(|(key, t)| Template::from(each_key_like(key, t))),
            prop::collection::vec(inner.clone(), 1..3)
                .prop_map(|variants| Template::from(array_containing(variants))),
            prop::collection::btree_map(field_name_strategy(), inner, 0..4)
                .prop_map(|fields| Template::from(Matcher::Struct(fields))),
        ]
    })
}
