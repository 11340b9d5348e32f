//! Property-based tests for pact-common.

use pact_common::{is_json_formatted_object, is_json_formatted_object_bytes};
use proptest::prelude::*;
use serde_json::{Map, Value};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any serialized object is recognised, whatever its keys and values.
    #[test]
    fn prop_serialized_objects_detected(
        entries in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..6),
    ) {
        let object: Map<String, Value> = entries
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect();
        let text = Value::Object(object).to_string();

        prop_assert!(is_json_formatted_object(&text));
        prop_assert!(is_json_formatted_object_bytes(text.as_bytes()));
    }

    /// Serialized scalars and arrays are never mistaken for objects.
    #[test]
    fn prop_scalars_not_detected(n in any::<i64>(), s in "[a-zA-Z0-9 ]{0,20}") {
        prop_assert!(!is_json_formatted_object(&n.to_string()));
        prop_assert!(!is_json_formatted_object(&Value::from(s.clone()).to_string()));
        prop_assert!(!is_json_formatted_object(&Value::from(vec![s]).to_string()));
    }
}
