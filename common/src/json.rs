//! JSON sniffing helpers.

use serde_json::Value;

/// Check whether a string holds a serialized JSON object.
///
/// Used to warn callers that passed an object as pre-rendered text, in which
/// case no matching rules can be extracted from it.
///
/// # Examples
///
/// ```
/// use pact_common::is_json_formatted_object;
///
/// assert!(is_json_formatted_object(r#"{"name": "Fred"}"#));
/// assert!(!is_json_formatted_object("[1, 2]"));
/// assert!(!is_json_formatted_object("plain text"));
/// ```
#[must_use]
pub fn is_json_formatted_object(content: &str) -> bool {
    matches!(serde_json::from_str::<Value>(content), Ok(Value::Object(_)))
}

/// Byte-slice form of [`is_json_formatted_object`].
#[must_use]
pub fn is_json_formatted_object_bytes(content: &[u8]) -> bool {
    matches!(serde_json::from_slice::<Value>(content), Ok(Value::Object(_)))
}
