use std::any::TypeId;
use std::fmt;

use crate::info::{DynamicInfo, EnumInfo, ListInfo, MapInfo, NewtypeInfo, OpaqueInfo};
use crate::info::{PointerInfo, SetInfo, StructInfo, TupleInfo, Type, UnionInfo};

// -----------------------------------------------------------------------------
// ReflectKind

/// The kind of a reflected type.
///
/// This is the closed set of shapes the engine dispatches over. Registries
/// use it as the "family" of a type when no converter matches the type
/// itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReflectKind {
    /// Named fields, built through a constructor.
    Struct,
    /// Fixed positions, heterogeneous.
    Tuple,
    /// Ordered, homogeneous.
    List,
    /// Unordered, homogeneous, unique.
    Set,
    /// Key to value.
    Map,
    /// Unit variants with a name and a value.
    Enum,
    /// One of several member types, possibly "no value".
    Union,
    /// A (possibly empty) indirection to one value.
    Pointer,
    /// A distinct type over one underlying type.
    Newtype,
    /// A leaf handled as a whole.
    Opaque,
    /// `Box<dyn Reflect>`: any reflected value.
    Dynamic,
}

impl ReflectKind {
    /// Lowercase name of the kind.
    ///
    /// ```
    /// use jk_reflect::info::ReflectKind;
    /// assert_eq!(ReflectKind::List.name(), "list");
    /// ```
    pub const fn name(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Tuple => "tuple",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
            Self::Enum => "enum",
            Self::Union => "union",
            Self::Pointer => "pointer",
            Self::Newtype => "newtype",
            Self::Opaque => "opaque",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for ReflectKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time type information, one variant per [`ReflectKind`].
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info) or
/// [`Reflect::reflect_type_info`](crate::Reflect::reflect_type_info).
#[derive(Debug)]
pub enum TypeInfo {
    Struct(StructInfo),
    Tuple(TupleInfo),
    List(ListInfo),
    Set(SetInfo),
    Map(MapInfo),
    Enum(EnumInfo),
    Union(UnionInfo),
    Pointer(PointerInfo),
    Newtype(NewtypeInfo),
    Opaque(OpaqueInfo),
    Dynamic(DynamicInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Returns the [`", stringify!($info), "`] if this is a `", stringify!($kind), "`.")]
        #[inline]
        pub const fn $name(&self) -> Option<&$info> {
            match self {
                Self::$kind(info) => Some(info),
                _ => None,
            }
        }
    };
}

impl TypeInfo {
    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::Tuple(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Set(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Enum(info) => info.ty(),
            Self::Union(info) => info.ty(),
            Self::Pointer(info) => info.ty(),
            Self::Newtype(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
            Self::Dynamic(info) => info.ty(),
        }
    }

    /// Returns the kind of this type.
    pub const fn kind(&self) -> ReflectKind {
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
            Self::Dynamic(_) => ReflectKind::Dynamic,
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    /// See [`TypePath::type_path`](crate::info::TypePath::type_path).
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// See [`TypePath::type_name`](crate::info::TypePath::type_name).
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    /// See [`TypePath::type_ident`](crate::info::TypePath::type_ident).
    #[inline]
    pub fn type_ident(&self) -> &'static str {
        self.ty().ident()
    }

    /// See [`TypePath::module_path`](crate::info::TypePath::module_path).
    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        self.ty().module_path()
    }

    /// Returns `true` if this is the info of `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.ty().is::<T>()
    }

    /// Returns `true` for `Box<dyn Reflect>`, the "any value" type.
    #[inline]
    pub const fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }

    /// Returns `true` if a value of this type can stand for "no value".
    ///
    /// That is `()`, unions with a none member (`Option<T>`), nullable
    /// pointers and `Box<dyn Reflect>`.
    ///
    /// ```
    /// use jk_reflect::info::Typed;
    ///
    /// assert!(<()>::type_info().accepts_none());
    /// assert!(<Option<u8>>::type_info().accepts_none());
    /// assert!(!u8::type_info().accepts_none());
    /// ```
    pub fn accepts_none(&self) -> bool {
        match self {
            Self::Union(info) => info.accepts_none(),
            Self::Pointer(info) => info.is_nullable(),
            Self::Dynamic(_) => true,
            Self::Opaque(info) => info.ty().is::<()>(),
            _ => false,
        }
    }

    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_tuple: Tuple => TupleInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_set: Set => SetInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_enum: Enum => EnumInfo);
    impl_cast_method!(as_union: Union => UnionInfo);
    impl_cast_method!(as_pointer: Pointer => PointerInfo);
    impl_cast_method!(as_newtype: Newtype => NewtypeInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);
}
