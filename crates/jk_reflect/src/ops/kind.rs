use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{Enum, List, Map, Set, Struct, Tuple, Union};

/// An immutable view of a reflected value, by kind.
///
/// Returned by [`Reflect::reflect_ref`]. `Box<dyn Reflect>` has no variant
/// of its own: boxes forward to their content.
///
/// ```
/// use jk_reflect::{Reflect, ops::ReflectRef};
///
/// let value = vec![1_u8, 2];
/// let ReflectRef::List(list) = value.reflect_ref() else { unreachable!() };
/// assert_eq!(list.len(), 2);
///
/// let value: Option<u8> = None;
/// let ReflectRef::Union(union) = value.reflect_ref() else { unreachable!() };
/// assert!(union.member().is_none());
/// ```
#[derive(Clone, Copy)]
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    Tuple(&'a dyn Tuple),
    List(&'a dyn List),
    Set(&'a dyn Set),
    Map(&'a dyn Map),
    Enum(&'a dyn Enum),
    Union(&'a dyn Union),
    /// The pointee, `None` for empty nullable pointers.
    Pointer(Option<&'a dyn Reflect>),
    /// The underlying value of a newtype.
    Newtype(&'a dyn Reflect),
    Opaque(&'a dyn Reflect),
}

impl ReflectRef<'_> {
    /// Returns the kind of the viewed value.
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::Tuple(_) => ReflectKind::Tuple,
            Self::List(_) => ReflectKind::List,
            Self::Set(_) => ReflectKind::Set,
            Self::Map(_) => ReflectKind::Map,
            Self::Enum(_) => ReflectKind::Enum,
            Self::Union(_) => ReflectKind::Union,
            Self::Pointer(_) => ReflectKind::Pointer,
            Self::Newtype(_) => ReflectKind::Newtype,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}
