use std::fmt;

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::ConstructError;

// -----------------------------------------------------------------------------
// PointerInfo

/// Info of an indirection: `Box<T>`, `Arc<T>`, `OnceLock<T>`.
///
/// Nullable pointers may be empty and load from `null`.
///
/// ```
/// use std::sync::{Arc, OnceLock};
/// use jk_reflect::info::Typed;
///
/// let info = <Arc<u8> as Typed>::type_info().as_pointer().unwrap();
/// assert!(info.pointee_info().is::<u8>());
/// assert!(!info.is_nullable());
///
/// let info = <OnceLock<u8> as Typed>::type_info().as_pointer().unwrap();
/// assert!(info.is_nullable());
/// ```
#[derive(Clone)]
pub struct PointerInfo {
    ty: Type,
    pointee: fn() -> &'static TypeInfo,
    nullable: bool,
    wrap: fn(Option<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError>,
}

impl PointerInfo {
    impl_type_fn!(ty);

    /// Creates a new [`PointerInfo`].
    #[inline]
    pub fn new<TPtr: TypePath, TPointee: Typed>(
        nullable: bool,
        wrap: fn(Option<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError>,
    ) -> Self {
        Self {
            ty: Type::of::<TPtr>(),
            pointee: TPointee::type_info,
            nullable,
            wrap,
        }
    }

    /// Returns the [`TypeInfo`] of the pointee.
    #[inline]
    pub fn pointee_info(&self) -> &'static TypeInfo {
        (self.pointee)()
    }

    /// Returns `true` if the pointer may be empty.
    #[inline]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Builds a pointer to `pointee`, or an empty one.
    ///
    /// Empty pointers fail with [`ConstructError::MissingValue`] unless
    /// nullable.
    #[inline]
    pub fn wrap(&self, pointee: Option<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.wrap)(pointee)
    }
}

impl fmt::Debug for PointerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerInfo")
            .field("ty", &self.ty)
            .field("nullable", &self.nullable)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// NewtypeInfo

/// Info of a distinct type over one underlying type: `struct Id(u64)`.
///
/// Newtypes have their own name. Registries that know no converter for the
/// newtype retry with the underlying type.
///
/// ```
/// use jk_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct Meters(f64);
///
/// let info = Meters::type_info().as_newtype().unwrap();
/// assert!(info.inner_info().is::<f64>());
///
/// let value = info.wrap(Box::new(2.5_f64)).unwrap();
/// assert_eq!(value.downcast_ref::<Meters>().unwrap().0, 2.5);
/// ```
#[derive(Clone)]
pub struct NewtypeInfo {
    ty: Type,
    inner: fn() -> &'static TypeInfo,
    wrap: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, ConstructError>,
}

impl NewtypeInfo {
    impl_type_fn!(ty);

    /// Creates a new [`NewtypeInfo`].
    #[inline]
    pub fn new<T: TypePath, TInner: Typed>(
        wrap: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, ConstructError>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            inner: TInner::type_info,
            wrap,
        }
    }

    /// Returns the [`TypeInfo`] of the underlying type.
    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner)()
    }

    /// Wraps a value of the underlying type.
    #[inline]
    pub fn wrap(&self, inner: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.wrap)(inner)
    }
}

impl fmt::Debug for NewtypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewtypeInfo")
            .field("ty", &self.ty)
            .field("inner", &self.inner_info().type_path())
            .finish()
    }
}
