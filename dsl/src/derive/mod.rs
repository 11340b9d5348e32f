//! Matcher trees derived from a type's shape.
//!
//! Derivation walks a [`TypeDescriptor`] depth first:
//!
//! - pointers derive from their pointee
//! - sequences become [`each_like`] of their element (`min`, default 1),
//!   or [`array_min_max_like`] when `max` is annotated
//! - records become a struct matcher of their named fields
//! - strings, bools, integers and floats become [`like`] of an annotated or
//!   default example; a string with `regex` becomes a [`term`] and one with
//!   `generator` a date/time generator
//!
//! Any other kind, and any malformed annotation, aborts derivation of the
//! whole type.
//!
//! [`each_like`]: crate::matchers::each_like
//! [`array_min_max_like`]: crate::matchers::array_min_max_like
//! [`like`]: crate::matchers::like
//! [`term`]: crate::matchers::term

mod descriptor;
mod strategy;
mod tag;

pub use descriptor::{Describe, Field, Kind, TypeDescriptor, descriptor_of};
pub use strategy::{CamelCaseFieldStrategy, DefaultFieldStrategy, FieldMatchArgs, FieldStrategy};
pub use tag::{Tag, TagKey};

use crate::matchers::{
    DateTimeKind, Matcher, array_min_max_like, date_generated, date_time_generated, each_like,
    like, term, time_generated,
};
use crate::{PactError, PactResult, Template};
use std::collections::BTreeMap;
use tracing::debug;

const DEFAULT_STRING: &str = "string";
const DEFAULT_BOOL: bool = true;
const DEFAULT_INTEGER: i64 = 1;
const DEFAULT_FLOAT: f64 = 1.1;
const DEFAULT_MIN: i64 = 1;

/// Derives matchers using a [`FieldStrategy`].
#[derive(Debug, Clone, Default)]
pub struct Deriver<S = DefaultFieldStrategy> {
    strategy: S,
}

impl Deriver {
    /// Create a deriver with the default field strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: FieldStrategy> Deriver<S> {
    /// Create a deriver with a custom field strategy.
    #[must_use]
    pub const fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Derive the matcher for `descriptor`.
    ///
    /// # Errors
    ///
    /// [`PactError::InvalidTag`] for a malformed field annotation, and
    /// [`PactError::UnsupportedType`] for a kind without a default matcher
    /// or a record that contains itself.
    pub fn derive(&self, descriptor: &TypeDescriptor) -> PactResult<Matcher> {
        let mut records = Vec::new();
        self.derive_kind(descriptor, &Tag::default(), &mut records)
    }

    fn derive_kind(
        &self,
        descriptor: &TypeDescriptor,
        tag: &Tag,
        records: &mut Vec<*const TypeDescriptor>,
    ) -> PactResult<Matcher> {
        match &descriptor.kind {
            Kind::Pointer(inner) => self.derive_kind(inner, tag, records),
            Kind::Sequence(element) => {
                tag.ensure_only(&[TagKey::Min, TagKey::Max], "sequence")?;
                let content = self.derive_kind(element, &Tag::default(), records)?;
                let min = tag.min.unwrap_or(DEFAULT_MIN);
                Ok(match tag.max {
                    Some(max) => array_min_max_like(content, min, max),
                    None => each_like(content, min),
                })
            }
            Kind::Record(fields) => {
                tag.ensure_only(&[], "record")?;
                // Descriptors are cached per type, so identity stands for the type.
                let id = std::ptr::from_ref(descriptor);
                if records.contains(&id) {
                    return Err(PactError::unsupported(descriptor.name, "recursive record"));
                }

                records.push(id);
                let derived = self.derive_fields(fields, records);
                records.pop();
                derived
            }
            Kind::String => derive_string(tag),
            Kind::Bool => {
                tag.ensure_only(&[TagKey::Example], "bool")?;
                Ok(like(tag.example_as("bool")?.unwrap_or(DEFAULT_BOOL)))
            }
            Kind::Integer => {
                tag.ensure_only(&[TagKey::Example], "integer")?;
                Ok(like(tag.example_as("integer")?.unwrap_or(DEFAULT_INTEGER)))
            }
            Kind::Float => {
                tag.ensure_only(&[TagKey::Example], "float")?;
                Ok(like(tag.example_as("float")?.unwrap_or(DEFAULT_FLOAT)))
            }
            Kind::Unsupported(kind) => Err(PactError::unsupported(descriptor.name, *kind)),
        }
    }

    fn derive_fields(
        &self,
        fields: &[Field],
        records: &mut Vec<*const TypeDescriptor>,
    ) -> PactResult<Matcher> {
        let mut derived = BTreeMap::new();
        for field in fields {
            let Some(args) = self.strategy.field_match_args(field) else {
                continue;
            };
            debug!(field = %args.name, type_name = args.descriptor.name, "deriving field");

            let tag = args.tag.map(Tag::parse).transpose()?.unwrap_or_default();
            let matcher = self.derive_kind(&args.descriptor, &tag, records)?;
            derived.insert(args.name, Template::from(matcher));
        }
        Ok(Matcher::Struct(derived))
    }
}

fn derive_string(tag: &Tag) -> PactResult<Matcher> {
    tag.ensure_only(
        &[
            TagKey::Example,
            TagKey::Regex,
            TagKey::Format,
            TagKey::Generator,
        ],
        "string",
    )?;

    let example = tag.example.clone();
    Ok(match (example, &tag.regex, tag.generator, &tag.format) {
        (Some(example), Some(regex), _, _) => term(example, regex.as_str()),
        (Some(example), None, Some(kind), Some(format)) => {
            let format = format.as_str();
            match kind {
                DateTimeKind::Date => date_generated(example, format),
                DateTimeKind::Time => time_generated(example, format),
                DateTimeKind::DateTime => date_time_generated(example, format),
            }
        }
        (Some(example), _, _, _) => like(example),
        (None, _, _, _) => like(DEFAULT_STRING),
    })
}

/// Derive the matcher for `T` with the default field strategy.
///
/// # Errors
///
/// As for [`Deriver::derive`].
///
/// # Example
///
/// ```
/// use pact_dsl::derive::{Describe, Field, TypeDescriptor, derive};
/// use serde_json::json;
///
/// struct Word;
///
/// impl Describe for Word {
///     fn describe() -> TypeDescriptor {
///         TypeDescriptor::record("Word")
///             .field(Field::new::<String>("word"))
///             .field(Field::new::<i32>("length"))
///     }
/// }
///
/// let matcher = derive::<Word>().unwrap();
/// assert_eq!(matcher.example(), json!({"word": "string", "length": 1}));
/// ```
pub fn derive<T: Describe>() -> PactResult<Matcher> {
    Deriver::new().derive(&descriptor_of::<T>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::struct_matcher;
    use std::collections::HashMap;

    struct Word;

    impl Describe for Word {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::record("Word")
                .field(Field::new::<String>("word"))
                .field(Field::new::<i32>("length"))
        }
    }

    struct Tagged;

    impl Describe for Tagged {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::record("Tagged")
                .field(
                    Field::new::<String>("date")
                        .pact(r"example=2000-01-01,regex=^\d{4}-\d{2}-\d{2}$"),
                )
                .field(Field::new::<Vec<Word>>("words").pact("min=2"))
                .field(Field::new::<Option<bool>>("active").pact("example=false"))
                .field(Field::new::<u8>("count").pact("example=0"))
                .field(Field::new::<f32>("ratio").pact("example=0.5"))
                .field(Field::new::<Vec<u8>>("bytes").pact("min=1,max=4"))
                .field(Field::new::<String>("secret").skip())
                .field(Field::new::<String>("display_name").rename("displayName"))
        }
    }

    struct WithMap;

    impl Describe for WithMap {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::record("WithMap").field(Field::new::<HashMap<String, i32>>("lookup"))
        }
    }

    struct BadTag;

    impl Describe for BadTag {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::record("BadTag")
                .field(Field::new::<String>("ok"))
                .field(Field::new::<String>("date").pact(r"regex=^\d+$"))
        }
    }

    struct Tree;

    impl Describe for Tree {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::record("Tree").field(Field::new::<Option<Box<Self>>>("parent"))
        }
    }

    fn word_matcher() -> Matcher {
        struct_matcher([("word", like("string")), ("length", like(1))])
    }

    #[test]
    fn test_untagged_defaults() {
        assert_eq!(derive::<Word>().unwrap(), word_matcher());
    }

    #[test]
    fn test_tagged_fields() {
        let expected = struct_matcher([
            ("date", term("2000-01-01", r"^\d{4}-\d{2}-\d{2}$")),
            ("words", each_like(word_matcher(), 2)),
            ("active", like(false)),
            ("count", like(0)),
            ("ratio", like(0.5)),
            ("bytes", array_min_max_like(like(1), 1, 4)),
            ("displayName", like("string")),
        ]);

        assert_eq!(derive::<Tagged>().unwrap(), expected);
    }

    #[test]
    fn test_scalars_and_sequences() {
        assert_eq!(derive::<String>().unwrap(), like("string"));
        assert_eq!(derive::<Option<f64>>().unwrap(), like(1.1));
        assert_eq!(derive::<Vec<bool>>().unwrap(), each_like(like(true), 1));
    }

    #[test]
    fn test_unsupported_kind() {
        let err = derive::<WithMap>().unwrap_err();
        assert!(err.is_configuration_error());
        assert!(matches!(err, PactError::UnsupportedType { ref kind, .. } if kind == "map"));
    }

    #[test]
    fn test_malformed_tag_aborts() {
        let err = derive::<BadTag>().unwrap_err();
        assert!(matches!(err, PactError::InvalidTag { .. }));
    }

    #[test]
    fn test_tag_must_fit_kind() {
        struct Misplaced;

        impl Describe for Misplaced {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::record("Misplaced").field(Field::new::<String>("name").pact("min=2"))
            }
        }

        let err = derive::<Misplaced>().unwrap_err();
        assert!(err.to_string().contains("does not apply to a string field"));
    }

    #[test]
    fn test_generator_tag() {
        struct Event;

        impl Describe for Event {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::record("Event").field(
                    Field::new::<String>("at")
                        .pact("example=2000-01-01,format=yyyy-MM-dd,generator=date"),
                )
            }
        }

        assert_eq!(
            derive::<Event>().unwrap(),
            struct_matcher([("at", date_generated("2000-01-01", "yyyy-MM-dd"))])
        );
    }

    #[test]
    fn test_recursive_record() {
        let err = derive::<Tree>().unwrap_err();
        assert!(matches!(err, PactError::UnsupportedType { .. }));
    }

    #[test]
    fn test_same_named_records_are_not_recursive() {
        mod inner {
            use crate::derive::{Describe, Field, TypeDescriptor};

            pub struct Item;

            impl Describe for Item {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::record("Item").field(Field::new::<String>("sku"))
                }
            }
        }

        struct Item;

        impl Describe for Item {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::record("Item").field(Field::new::<Vec<inner::Item>>("parts"))
            }
        }

        let matcher = derive::<Item>().unwrap();
        assert_eq!(
            matcher,
            struct_matcher([(
                "parts",
                each_like(struct_matcher([("sku", like("string"))]), 1)
            )])
        );
    }

    #[test]
    fn test_camel_case_strategy() {
        struct Account;

        impl Describe for Account {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::record("Account").field(Field::new::<i64>("account_id"))
            }
        }

        let matcher = Deriver::with_strategy(CamelCaseFieldStrategy)
            .derive(&descriptor_of::<Account>())
            .unwrap();
        assert_eq!(matcher, struct_matcher([("accountId", like(1))]));
    }
}
