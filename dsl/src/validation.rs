//! Specification-version check run before resolution.
//!
//! The template is serialized to integration JSON and every object carrying
//! a `pact:specification` marker newer than the target version is reported.

use crate::matchers::{MATCHER_TYPE_KEY, SPECIFICATION_KEY};
use crate::{PactError, PactResult, SpecificationVersion, Template};
use serde_json::Value;
use tracing::debug;

/// Fail if `template` uses matchers newer than `version`.
///
/// # Errors
///
/// [`PactError::SpecificationMismatch`] naming each offending matcher type
/// once, in discovery order.
pub fn validate(version: SpecificationVersion, template: &Template) -> PactResult<()> {
    let value = serde_json::to_value(template)?;
    validate_value(version, &value)
}

/// Fail if the integration JSON `value` uses matchers newer than `version`.
///
/// # Errors
///
/// [`PactError::SpecificationMismatch`] as for [`validate`].
pub fn validate_value(version: SpecificationVersion, value: &Value) -> PactResult<()> {
    let matchers = offending_matchers(version, value);
    if matchers.is_empty() {
        return Ok(());
    }

    debug!(%version, ?matchers, "matchers rejected for specification version");
    Err(PactError::SpecificationMismatch { version, matchers })
}

/// Matcher types in `value` that need a version newer than `version`.
#[must_use]
pub fn offending_matchers(version: SpecificationVersion, value: &Value) -> Vec<String> {
    let mut found = Vec::new();
    scan(version, value, &mut found);
    found
}

fn scan(version: SpecificationVersion, value: &Value, found: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            let required = map
                .get(SPECIFICATION_KEY)
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<SpecificationVersion>().ok());

            if required.is_some_and(|required| required > version) {
                let matcher_type = map
                    .get(MATCHER_TYPE_KEY)
                    .and_then(Value::as_str)
                    .unwrap_or("unknown");
                if !found.iter().any(|f| f == matcher_type) {
                    found.push(matcher_type.to_string());
                }
            }

            for child in map.values() {
                scan(version, child, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                scan(version, item, found);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{each_like, equality, includes, integer, like, term};

    #[test]
    fn test_v2_matchers_pass() {
        let template = Template::object([
            ("name", Template::from(like("Fred"))),
            ("ids", Template::from(each_like(term("1", r"\d+"), 2))),
        ]);

        for version in [
            SpecificationVersion::V2,
            SpecificationVersion::V3,
            SpecificationVersion::V4,
        ] {
            assert!(validate(version, &template).is_ok());
        }
    }

    #[test]
    fn test_includes_rejected_for_v2() {
        let template = Template::object([("greeting", includes("foo"))]);

        let err = validate(SpecificationVersion::V2, &template).unwrap_err();
        assert!(matches!(
            &err,
            PactError::SpecificationMismatch { matchers, .. } if matchers == &["include"]
        ));
        assert!(err.to_string().contains("include"));
        assert!(validate(SpecificationVersion::V3, &template).is_ok());
    }

    #[test]
    fn test_scan_descends_into_arrays() {
        let template = Template::array([
            Template::from(like(1)),
            Template::array([Template::from(equality("x"))]),
        ]);

        let err = validate(SpecificationVersion::V2, &template).unwrap_err();
        assert!(err.to_string().contains("equality"));
    }

    #[test]
    fn test_each_type_reported_once() {
        let template = Template::array([integer(1), integer(2), includes("a")]);
        let value = serde_json::to_value(&template).unwrap();

        assert_eq!(
            offending_matchers(SpecificationVersion::V2, &value),
            vec!["integer".to_string(), "include".to_string()]
        );
    }
}
