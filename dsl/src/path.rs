//! JSON location strings for matching rules and generators.
//!
//! Paths grow left to right while the resolver walks a template:
//! `$` for the root, then `.field`, `['odd key']`, `[index]` or `[*]`.
//!
//! # Synthetic keys
//!
//! [`extend`] returns the parent unchanged when the key is empty or is a
//! non-negative integer. The resolver relies on this to walk array elements
//! and cardinality content through the same recursion as object fields: it
//! builds the bracket suffix itself, then recurses with a synthetic key so no
//! second segment is appended.
//!
//! The flip side is that an object field literally named `"0"` (or any other
//! digit string) contributes no segment either, so rules beneath it land on
//! the parent's path. Templates with numeric object keys are not supported.

/// The document root.
pub const ROOT: &str = "$";

/// Path of the field `key` below `parent`.
///
/// Empty and all-digit keys are synthetic and leave `parent` unchanged.
#[must_use]
pub fn extend(parent: &str, key: &str) -> String {
    if is_synthetic(key) {
        return parent.to_string();
    }
    field(parent, key)
}

/// Path of the field `key` below `parent`, for any key.
///
/// Keys outside `[A-Za-z0-9_-]` are written as `['key']` with `'` and `\`
/// escaped, so a field named `*` never reads as a wildcard.
#[must_use]
pub fn field(parent: &str, key: &str) -> String {
    if needs_quoting(key) {
        let mut quoted = String::with_capacity(parent.len() + key.len() + 4);
        quoted.push_str(parent);
        quoted.push_str("['");
        for c in key.chars() {
            if matches!(c, '\'' | '\\') {
                quoted.push('\\');
            }
            quoted.push(c);
        }
        quoted.push_str("']");
        quoted
    } else {
        format!("{parent}.{key}")
    }
}

/// Path of the element at `index` of the array at `parent`.
#[must_use]
pub fn index(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// Path matching every element of the array at `parent`.
#[must_use]
pub fn wildcard(parent: &str) -> String {
    format!("{parent}[*]")
}

/// Path matching every value of the map at `parent`.
#[must_use]
pub fn each_value(parent: &str) -> String {
    format!("{parent}.*")
}

/// Whether `key` is plumbing rather than a real field name.
#[must_use]
pub fn is_synthetic(key: &str) -> bool {
    key.bytes().all(|b| b.is_ascii_digit())
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty()
        || !key
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_field() {
        assert_eq!(extend(ROOT, "name"), "$.name");
        assert_eq!(extend("$.body", "user_id"), "$.body.user_id");
        assert_eq!(extend("$.a", "x-trace"), "$.a.x-trace");
    }

    #[test]
    fn test_extend_quotes_odd_keys() {
        assert_eq!(extend(ROOT, "first name"), "$['first name']");
        assert_eq!(extend(ROOT, "a.b"), "$['a.b']");
    }

    #[test]
    fn test_quoted_keys_are_escaped() {
        assert_eq!(extend(ROOT, "*"), "$['*']");
        assert_eq!(extend("$.a", "it's"), r"$.a['it\'s']");
        assert_eq!(extend(ROOT, r"back\slash"), r"$['back\\slash']");
        assert_ne!(extend(ROOT, "*"), each_value(ROOT));
    }

    #[test]
    fn test_field_keeps_numeric_keys() {
        assert_eq!(field("$.query", "2024"), "$.query.2024");
        assert_eq!(field("$.headers", "X-Id"), "$.headers.X-Id");
        assert_eq!(field("$.query", ""), "$.query['']");
        assert_eq!(field("$.query", "a b"), "$.query['a b']");
    }

    #[test]
    fn test_synthetic_keys_leave_path_unchanged() {
        // Array content is resolved under a synthetic key, after the caller
        // has already appended the bracket suffix.
        assert_eq!(extend("$.items[*]", "0"), "$.items[*]");
        assert_eq!(extend("$.items[3]", ""), "$.items[3]");
        assert_eq!(extend(ROOT, "42"), ROOT);

        // Numeric object keys are indistinguishable from synthetic ones.
        assert_eq!(extend("$.byYear", "2024"), "$.byYear");

        assert!(!is_synthetic("-1"));
        assert!(!is_synthetic("+1"));
        assert!(!is_synthetic("1a"));
        assert_eq!(extend(ROOT, "-1"), "$.-1");
    }

    #[test]
    fn test_array_segments() {
        assert_eq!(index(ROOT, 0), "$[0]");
        assert_eq!(index("$.a", 12), "$.a[12]");
        assert_eq!(wildcard("$.a"), "$.a[*]");
        assert_eq!(each_value("$.a"), "$.a.*");
    }
}
