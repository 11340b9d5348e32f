//! Structural type descriptors.
//!
//! A [`TypeDescriptor`] is computed once per type by [`Describe::describe`]
//! and cached process-wide by [`descriptor_of`]. Derivation walks
//! descriptors, never values.

use std::any::{TypeId, type_name};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// The structural shape of a type.
#[derive(Debug, Clone)]
pub enum Kind {
    /// `Option`, `Box`, `Rc`, `Arc`: derived from the pointee
    Pointer(Arc<TypeDescriptor>),
    /// Any homogeneous sequence
    Sequence(Arc<TypeDescriptor>),
    /// A struct with named fields
    Record(Vec<Field>),
    /// Text
    String,
    /// `bool`
    Bool,
    /// Any integer width or signedness
    Integer,
    /// Any float width
    Float,
    /// A shape no default matcher exists for, such as `"map"`
    Unsupported(&'static str),
}

impl Kind {
    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pointer(_) => "pointer",
            Self::Sequence(_) => "sequence",
            Self::Record(_) => "record",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Unsupported(kind) => *kind,
        }
    }
}

/// Name and shape of one type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Type name, for diagnostics
    pub name: &'static str,
    /// Structural kind
    pub kind: Kind,
}

impl TypeDescriptor {
    /// Create a descriptor.
    #[must_use]
    pub const fn new(name: &'static str, kind: Kind) -> Self {
        Self { name, kind }
    }

    /// Create a record descriptor with no fields yet.
    #[must_use]
    pub const fn record(name: &'static str) -> Self {
        Self::new(name, Kind::Record(Vec::new()))
    }

    /// Add a field. Has no effect unless this is a record descriptor.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        if let Kind::Record(fields) = &mut self.kind {
            fields.push(field);
        }
        self
    }
}

/// One named field of a record.
#[derive(Debug, Clone)]
pub struct Field {
    /// Rust identifier of the field
    pub ident: &'static str,
    /// Serialized name, when it differs from the identifier
    pub rename: Option<&'static str>,
    /// Raw `pact` annotation, e.g. `"example=Fred"`
    pub pact: Option<&'static str>,
    /// Whether the field is absent from the serialized form
    pub skip: bool,
    descriptor: fn() -> Arc<TypeDescriptor>,
}

impl Field {
    /// Describe field `ident` of type `T`.
    #[must_use]
    pub fn new<T: Describe>(ident: &'static str) -> Self {
        Self {
            ident,
            rename: None,
            pact: None,
            skip: false,
            descriptor: descriptor_of::<T>,
        }
    }

    /// Set the serialized name.
    #[must_use]
    pub const fn rename(mut self, name: &'static str) -> Self {
        self.rename = Some(name);
        self
    }

    /// Set the `pact` annotation.
    #[must_use]
    pub const fn pact(mut self, annotation: &'static str) -> Self {
        self.pact = Some(annotation);
        self
    }

    /// Leave the field out of the serialized form.
    #[must_use]
    pub const fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Descriptor of the field's type.
    ///
    /// Resolved on demand so records may refer to themselves through a
    /// pointer or sequence.
    #[must_use]
    pub fn descriptor(&self) -> Arc<TypeDescriptor> {
        (self.descriptor)()
    }
}

/// Types that can report their structural shape.
///
/// Implemented for the standard scalar, pointer and collection types.
/// Records implement it by listing their fields:
///
/// ```
/// use pact_dsl::derive::{Describe, Field, TypeDescriptor};
///
/// struct User {
///     name: String,
///     tags: Vec<String>,
/// }
///
/// impl Describe for User {
///     fn describe() -> TypeDescriptor {
///         TypeDescriptor::record("User")
///             .field(Field::new::<String>("name").pact("example=Fred"))
///             .field(Field::new::<Vec<String>>("tags").pact("min=2"))
///     }
/// }
/// ```
pub trait Describe: 'static {
    /// Build this type's descriptor.
    fn describe() -> TypeDescriptor;
}

type Cache = RwLock<HashMap<TypeId, Arc<TypeDescriptor>>>;

static DESCRIPTORS: OnceLock<Cache> = OnceLock::new();

/// The cached descriptor of `T`, built on first use.
#[must_use]
pub fn descriptor_of<T: Describe>() -> Arc<TypeDescriptor> {
    let cache = DESCRIPTORS.get_or_init(Cache::default);
    let id = TypeId::of::<T>();

    if let Some(descriptor) = cache
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
    {
        return Arc::clone(descriptor);
    }

    // Describing may recurse into descriptor_of, so no lock is held here.
    let described = Arc::new(T::describe());
    let mut cache = cache.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(cache.entry(id).or_insert(described))
}

fn scalar<T: ?Sized>(kind: Kind) -> TypeDescriptor {
    TypeDescriptor::new(type_name::<T>(), kind)
}

macro_rules! describe_scalar {
    ($kind:expr => $($ty:ty),*) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    scalar::<Self>($kind)
                }
            }
        )*
    };
}

describe_scalar!(Kind::String => String, &'static str);
describe_scalar!(Kind::Bool => bool);
describe_scalar!(Kind::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
describe_scalar!(Kind::Float => f32, f64);
describe_scalar!(Kind::Unsupported("char") => char);
describe_scalar!(Kind::Unsupported("dynamic") => serde_json::Value);

macro_rules! describe_wrapper {
    ($variant:ident => $($ty:ident),*) => {
        $(
            impl<T: Describe> Describe for $ty<T> {
                fn describe() -> TypeDescriptor {
                    scalar::<Self>(Kind::$variant(descriptor_of::<T>()))
                }
            }
        )*
    };
}

describe_wrapper!(Pointer => Option, Box, Rc, Arc);
describe_wrapper!(Sequence => Vec, VecDeque);

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        scalar::<Self>(Kind::Sequence(descriptor_of::<T>()))
    }
}

impl<K: 'static, V: 'static, S: 'static> Describe for HashMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        scalar::<Self>(Kind::Unsupported("map"))
    }
}

impl<K: 'static, V: 'static> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        scalar::<Self>(Kind::Unsupported("map"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node {
        _children: Vec<Node>,
    }

    impl Describe for Node {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::record("Node").field(Field::new::<Vec<Self>>("children"))
        }
    }

    #[test]
    fn test_scalar_kinds() {
        assert!(matches!(descriptor_of::<String>().kind, Kind::String));
        assert!(matches!(descriptor_of::<&str>().kind, Kind::String));
        assert!(matches!(descriptor_of::<u16>().kind, Kind::Integer));
        assert!(matches!(descriptor_of::<f32>().kind, Kind::Float));
        assert!(matches!(descriptor_of::<char>().kind, Kind::Unsupported("char")));
    }

    #[test]
    fn test_wrappers() {
        let descriptor = descriptor_of::<Option<Box<i32>>>();
        let Kind::Pointer(inner) = &descriptor.kind else {
            panic!("expected a pointer kind");
        };
        assert!(matches!(inner.kind, Kind::Pointer(_)));

        assert!(matches!(descriptor_of::<[bool; 3]>().kind, Kind::Sequence(_)));
        assert!(matches!(
            descriptor_of::<BTreeMap<String, i32>>().kind,
            Kind::Unsupported("map")
        ));
    }

    #[test]
    fn test_descriptors_are_cached() {
        let first = descriptor_of::<Vec<String>>();
        let second = descriptor_of::<Vec<String>>();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_self_referential_record() {
        let descriptor = descriptor_of::<Node>();
        let Kind::Record(fields) = &descriptor.kind else {
            panic!("expected a record kind");
        };
        assert_eq!(fields[0].ident, "children");
        assert!(matches!(fields[0].descriptor().kind, Kind::Sequence(_)));
    }

    #[test]
    fn test_field_builder() {
        let field = Field::new::<String>("user_name")
            .rename("userName")
            .pact("example=Fred");
        assert_eq!(field.rename, Some("userName"));
        assert_eq!(field.pact, Some("example=Fred"));
        assert!(!field.skip);
        assert!(field.skip().skip);
    }
}
