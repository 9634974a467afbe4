use std::borrow::Cow;
use std::fmt;

use jk_reflect::info::{ReflectKind, TypeInfo, Typed};

use crate::name;

/// Describes what a converter is registered for, or what a value is loaded
/// into.
///
/// - [`Static`](Self::Static): one concrete type, and every struct that
///   declares it as a base.
/// - [`Kind`](Self::Kind): a whole family of types, such as every list.
/// - [`Any`](Self::Any): every type; as a load target, "infer the type".
/// - [`Named`](Self::Named): a type known only by name, resolved through
///   announced and auto-registered types.
///
/// ```
/// use jk_json::TypeDescriptor;
/// use jk_reflect::info::{ReflectKind, Typed};
///
/// let list = TypeDescriptor::from(ReflectKind::List);
/// assert!(list.matches(<Vec<u8>>::type_info()));
/// assert!(!list.matches(u8::type_info()));
/// assert!(TypeDescriptor::of::<u8>().matches(u8::type_info()));
/// ```
#[derive(Clone)]
pub enum TypeDescriptor {
    Static(&'static TypeInfo),
    Kind(ReflectKind),
    Any,
    Named(Cow<'static, str>),
}

impl TypeDescriptor {
    /// The descriptor of `T`. `Box<dyn Reflect>` gives [`Any`](Self::Any).
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self::from(T::type_info())
    }

    /// A type known by its name.
    #[inline]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Named(name.into())
    }

    /// Returns the key converters for this descriptor are stored under.
    pub(crate) fn registry_key(&self) -> String {
        match self {
            Self::Static(info) => name::registry_key(info),
            Self::Kind(kind) => format!("<{kind}>"),
            Self::Any => String::from("<any>"),
            Self::Named(name) => name.to_lowercase(),
        }
    }

    /// Returns `true` if `info` is this type, a subtype of it, or a member
    /// of this family.
    pub fn matches(&self, info: &TypeInfo) -> bool {
        match self {
            Self::Static(base) => {
                info.type_id() == base.type_id()
                    || info
                        .as_struct()
                        .is_some_and(|s| s.extends(base.type_id()))
            }
            Self::Kind(kind) => info.kind() == *kind,
            Self::Any => true,
            Self::Named(_) => {
                let key = self.registry_key();
                name::registry_key(info) == key
                    || info
                        .as_struct()
                        .is_some_and(|s| s.bases().any(|base| name::registry_key(base) == key))
            }
        }
    }
}

impl From<&'static TypeInfo> for TypeDescriptor {
    #[inline]
    fn from(info: &'static TypeInfo) -> Self {
        if info.is_dynamic() {
            Self::Any
        } else {
            Self::Static(info)
        }
    }
}

impl From<ReflectKind> for TypeDescriptor {
    #[inline]
    fn from(kind: ReflectKind) -> Self {
        Self::Kind(kind)
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Static(a), Self::Static(b)) => a.type_id() == b.type_id(),
            (Self::Kind(a), Self::Kind(b)) => a == b,
            (Self::Any, Self::Any) => true,
            (Self::Named(a), Self::Named(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        }
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(info) => write!(f, "Static({})", info.type_path()),
            Self::Kind(kind) => write!(f, "Kind({kind})"),
            Self::Any => f.write_str("Any"),
            Self::Named(name) => write!(f, "Named({name})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use jk_reflect::Reflect;
    use jk_reflect::derive::Reflect;
    use jk_reflect::info::Typed;

    use super::TypeDescriptor;

    #[derive(Reflect)]
    struct Animal {
        name: String,
    }

    #[derive(Reflect)]
    #[reflect(extends(Animal))]
    struct Dog {
        name: String,
    }

    #[test]
    fn subtypes_match_their_bases() {
        let animal = TypeDescriptor::of::<Animal>();
        assert!(animal.matches(Dog::type_info()));
        assert!(!TypeDescriptor::of::<Dog>().matches(Animal::type_info()));

        let named = TypeDescriptor::named(format!("{}::animal", module_path!()));
        assert!(named.matches(Dog::type_info()));
        assert!(named.matches(Animal::type_info()));
    }

    #[test]
    fn dynamic_is_any() {
        assert_eq!(TypeDescriptor::of::<Box<dyn Reflect>>(), TypeDescriptor::Any);
        assert!(TypeDescriptor::Any.matches(u8::type_info()));
    }
}
