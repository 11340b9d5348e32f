//! Field naming strategies.

use super::descriptor::{Field, TypeDescriptor};
use std::sync::Arc;

/// What derivation needs to know about one record field.
#[derive(Debug, Clone)]
pub struct FieldMatchArgs {
    /// Key in the derived object
    pub name: String,
    /// Descriptor of the field's type
    pub descriptor: Arc<TypeDescriptor>,
    /// Raw `pact` annotation
    pub tag: Option<&'static str>,
}

/// Decides how record fields appear in a derived matcher.
pub trait FieldStrategy {
    /// Serialized name of `field`, or `None` to leave it out.
    fn field_name(&self, field: &Field) -> Option<String>;

    /// Derivation arguments for `field`, or `None` to leave it out.
    fn field_match_args(&self, field: &Field) -> Option<FieldMatchArgs> {
        let name = self.field_name(field)?;
        Some(FieldMatchArgs {
            name,
            descriptor: field.descriptor(),
            tag: field.pact,
        })
    }
}

/// Uses the rename when present, the identifier otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFieldStrategy;

impl FieldStrategy for DefaultFieldStrategy {
    fn field_name(&self, field: &Field) -> Option<String> {
        if field.skip {
            return None;
        }
        Some(field.rename.unwrap_or(field.ident).to_string())
    }
}

/// Like [`DefaultFieldStrategy`], but camel-cases identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelCaseFieldStrategy;

impl FieldStrategy for CamelCaseFieldStrategy {
    fn field_name(&self, field: &Field) -> Option<String> {
        if field.skip {
            return None;
        }
        Some(field.rename.map_or_else(|| camel_case(field.ident), str::to_string))
    }
}

fn camel_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    let mut upper = false;
    for c in ident.trim_start_matches("r#").chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
