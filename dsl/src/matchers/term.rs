//! Ready-made regular expression matchers for common string shapes.
//!
//! Date and time examples are rendered from one fixed instant,
//! 2000-02-01T12:30:00Z, so generated contracts stay stable across runs.

use super::{Matcher, like, term};
use chrono::{DateTime, SecondsFormat, Utc};

const HEX_VALUE: &str = r"^[0-9a-fA-F]+$";
const IPV4_ADDRESS: &str = r"^(\d{1,3}\.)+\d{1,3}$";
const IPV6_ADDRESS: &str = r"^(([0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}|(([0-9a-fA-F]{1,4}:){0,7}[0-9a-fA-F]{0,4})?::(([0-9a-fA-F]{1,4}:){0,6}[0-9a-fA-F]{0,4})?((\d{1,3}\.){3}\d{1,3})?)$";
const UUID: &str = r"^[0-9a-f]{8}(-[0-9a-f]{4}){3}-[0-9a-f]{12}$";
const TIMESTAMP: &str =
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})$";
const DATE: &str = r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$";
const TIME: &str = r"^T([01]\d|2[0-3]):[0-5]\d:[0-5]\d$";

/// 2000-02-01T12:30:00Z as seconds since the epoch.
const EXAMPLE_INSTANT: i64 = 949_408_200;

fn example_instant() -> DateTime<Utc> {
    DateTime::from_timestamp(EXAMPLE_INSTANT, 0).unwrap_or_default()
}

/// A hexadecimal string.
#[must_use]
pub fn hex_value() -> Matcher {
    term("3F", HEX_VALUE)
}

/// A numeric identifier, matched on type.
#[must_use]
pub fn identifier() -> Matcher {
    like(42)
}

/// An IPv4 address.
#[must_use]
pub fn ip_address() -> Matcher {
    ipv4_address()
}

/// An IPv4 address.
#[must_use]
pub fn ipv4_address() -> Matcher {
    term("127.0.0.13", IPV4_ADDRESS)
}

/// An IPv6 address.
#[must_use]
pub fn ipv6_address() -> Matcher {
    term("::ffff:192.0.2.128", IPV6_ADDRESS)
}

/// An RFC 3339 timestamp.
#[must_use]
pub fn timestamp() -> Matcher {
    term(
        example_instant().to_rfc3339_opts(SecondsFormat::Secs, true),
        TIMESTAMP,
    )
}

/// An ISO 8601 calendar date.
#[must_use]
pub fn date() -> Matcher {
    term(example_instant().format("%Y-%m-%d").to_string(), DATE)
}

/// An ISO 8601 time of day, with its `T` designator.
#[must_use]
pub fn time() -> Matcher {
    term(example_instant().format("T%H:%M:%S").to_string(), TIME)
}

/// A lowercase hyphenated UUID.
#[must_use]
pub fn uuid() -> Matcher {
    term("fc763eba-0905-41c5-a27f-3934ab26786c", UUID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_example_matches(matcher: &Matcher) {
        let Matcher::Regex { example, regex } = matcher else {
            panic!("expected a regex matcher, got {matcher:?}");
        };
        let pattern = regex::Regex::new(regex).unwrap();
        assert!(pattern.is_match(example), "{example} does not match {regex}");
    }

    #[test]
    fn test_examples_match_their_patterns() {
        for matcher in [
            hex_value(),
            ip_address(),
            ipv4_address(),
            ipv6_address(),
            timestamp(),
            date(),
            time(),
            uuid(),
        ] {
            assert_example_matches(&matcher);
        }
    }

    #[test]
    fn test_fixed_instant() {
        assert_eq!(timestamp().example(), json!("2000-02-01T12:30:00Z"));
        assert_eq!(date().example(), json!("2000-02-01"));
        assert_eq!(time().example(), json!("T12:30:00"));
    }

    #[test]
    fn test_identifier() {
        assert_eq!(identifier(), like(42));
    }
}
