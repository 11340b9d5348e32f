//! Checks that a rule path points into a body.

use serde_json::Value;

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Field(String),
    AnyField,
    Index(usize),
    AnyIndex,
}

fn parse(path: &str) -> Option<Vec<Segment>> {
    let mut rest = path.strip_prefix('$')?;
    let mut segments = Vec::new();

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("['") {
            let (name, remainder) = quoted(after)?;
            segments.push(Segment::Field(name));
            rest = remainder;
        } else if let Some(after) = rest.strip_prefix('[') {
            let end = after.find(']')?;
            segments.push(match &after[..end] {
                "*" => Segment::AnyIndex,
                index => Segment::Index(index.parse().ok()?),
            });
            rest = &after[end + 1..];
        } else if let Some(after) = rest.strip_prefix('.') {
            let end = after.find(['.', '[']).unwrap_or(after.len());
            segments.push(match &after[..end] {
                "" => return None,
                "*" => Segment::AnyField,
                name => Segment::Field(name.to_string()),
            });
            rest = &after[end..];
        } else {
            return None;
        }
    }

    Some(segments)
}

/// Unescape a quoted key, returning it and the text after its closing `']`.
fn quoted(input: &str) -> Option<(String, &str)> {
    let mut name = String::new();
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => name.push(chars.next()?.1),
            '\'' => return input[i + 1..].strip_prefix(']').map(|rest| (name, rest)),
            _ => name.push(c),
        }
    }
    None
}

fn resolves(value: &Value, segments: &[Segment]) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return true;
    };

    match (segment, value) {
        (Segment::Field(name), Value::Object(map)) => {
            map.get(name).is_some_and(|child| resolves(child, rest))
        }
        (Segment::AnyField, Value::Object(map)) => map.values().any(|child| resolves(child, rest)),
        (Segment::Index(i), Value::Array(items)) => {
            items.get(*i).is_some_and(|child| resolves(child, rest))
        }
        (Segment::AnyIndex, Value::Array(items)) => items.iter().any(|child| resolves(child, rest)),
        _ => false,
    }
}

/// Whether the `$`-rooted `path` denotes a position in `body`.
///
/// `*` and `[*]` match any key or element.
#[must_use]
pub fn path_resolves(body: &Value, path: &str) -> bool {
    parse(path).is_some_and(|segments| resolves(body, &segments))
}
