use std::fmt;

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::ConstructError;

// -----------------------------------------------------------------------------
// UnionMember

/// One alternative of a union.
#[derive(Clone, Copy)]
pub struct UnionMember {
    name: &'static str,
    type_info: fn() -> &'static TypeInfo,
    is_none: bool,
}

impl UnionMember {
    /// A member carrying a value of type `T`.
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_info: T::type_info,
            is_none: false,
        }
    }

    /// The member standing for "no value". Its payload type is `()`.
    #[inline]
    pub fn none(name: &'static str) -> Self {
        Self {
            name,
            type_info: <()>::type_info,
            is_none: true,
        }
    }

    /// Returns the member name (the variant name for enums).
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`TypeInfo`] of the payload.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns `true` for the "no value" member.
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.is_none
    }
}

impl fmt::Debug for UnionMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionMember")
            .field("name", &self.name)
            .field("type", &self.type_info().type_path())
            .field("is_none", &self.is_none)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// UnionInfo

/// A container for compile-time union info.
///
/// A union value is exactly one of its members. `Option<T>` is the union
/// of `T` and none; enums whose variants hold one value each derive as
/// unions too.
///
/// Members are tried in declaration order when loading.
///
/// # Examples
///
/// ```
/// use jk_reflect::info::Typed;
///
/// let info = <Option<String> as Typed>::type_info().as_union().unwrap();
/// assert_eq!(info.member_len(), 2);
/// assert!(info.member_at(0).unwrap().type_info().is::<String>());
/// assert!(info.accepts_none());
///
/// let none = info.from_member(1, Box::new(())).unwrap();
/// assert!(none.downcast_ref::<Option<String>>().unwrap().is_none());
/// ```
#[derive(Clone)]
pub struct UnionInfo {
    ty: Type,
    members: Box<[UnionMember]>,
    from_member: fn(usize, Box<dyn Reflect>) -> Result<Box<dyn Reflect>, ConstructError>,
}

impl UnionInfo {
    impl_type_fn!(ty);

    /// Creates a new [`UnionInfo`].
    ///
    /// `from_member` wraps a payload as the member at an index.
    pub fn new<T: TypePath>(
        members: &[UnionMember],
        from_member: fn(usize, Box<dyn Reflect>) -> Result<Box<dyn Reflect>, ConstructError>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            members: members.into(),
            from_member,
        }
    }

    /// Returns the members in declaration order.
    #[inline]
    pub fn members(&self) -> &[UnionMember] {
        &self.members
    }

    /// Returns the member at `index`, if present.
    #[inline]
    pub fn member_at(&self, index: usize) -> Option<&UnionMember> {
        self.members.get(index)
    }

    /// Returns the number of members.
    #[inline]
    pub fn member_len(&self) -> usize {
        self.members.len()
    }

    /// Returns the index of the none member, if the union has one.
    pub fn none_index(&self) -> Option<usize> {
        self.members.iter().position(UnionMember::is_none)
    }

    /// Returns `true` if the union has a none member.
    #[inline]
    pub fn accepts_none(&self) -> bool {
        self.none_index().is_some()
    }

    /// Wraps `payload` as the member at `index`.
    #[inline]
    pub fn from_member(
        &self,
        index: usize,
        payload: Box<dyn Reflect>,
    ) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.from_member)(index, payload)
    }
}

impl fmt::Debug for UnionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionInfo")
            .field("ty", &self.ty)
            .field("members", &self.members)
            .finish()
    }
}
