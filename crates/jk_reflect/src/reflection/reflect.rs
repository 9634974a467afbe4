use std::any::{Any, TypeId};
use std::fmt;

use crate::info::{ReflectKind, TypeInfo};
use crate::ops::{ReflectRef, Struct};
use crate::reflection::Identity;

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for runtime access to values.
///
/// A `Reflect` value knows its static [`TypeInfo`] and can be viewed by kind
/// through [`reflect_ref`](Reflect::reflect_ref). That is all the dump side of
/// the engine needs. The load side works from [`TypeInfo`] alone, whose
/// constructors produce `Box<dyn Reflect>` values.
///
/// # Boxed values
///
/// `Box<dyn Reflect>` implements `Reflect` itself, so it can be used as a
/// field or element type meaning "any reflected value". It is transparent:
/// type info, identity, kind views and downcasts all see the boxed value.
///
/// ```
/// use jk_reflect::Reflect;
///
/// let inner: Box<dyn Reflect> = Box::new(10_i32);
/// let outer: Box<dyn Reflect> = Box::new(inner);
///
/// assert!(outer.is::<i32>());
/// assert_eq!(outer.reflect_type_info().type_path(), "i32");
/// assert_eq!(outer.take::<i32>().unwrap(), 10);
/// ```
///
/// # Implementation
///
/// Use [the derive macro](crate::derive::Reflect). Manual implementations
/// for foreign-shaped types look like the ones in [`impls`](crate::impls):
///
/// ```ignore
/// impl Reflect for MyType {
///     jk_reflect::__macro_exports::impl_reflect_basics!();
///
///     fn reflect_ref(&self) -> ReflectRef<'_> {
///         ReflectRef::Opaque(self)
///     }
/// }
/// ```
pub trait Reflect: Send + Sync + Any {
    /// Returns the [`TypeInfo`] of the underlying type.
    fn reflect_type_info(&self) -> &'static TypeInfo;

    /// Returns the type path of the underlying type.
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        self.reflect_type_info().type_path()
    }

    /// Returns the kind of the underlying type.
    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        self.reflect_type_info().kind()
    }

    /// Casts this value to `&dyn Reflect`, unwrapping `Box<dyn Reflect>`.
    fn as_reflect(&self) -> &dyn Reflect;

    /// Casts this value to `&mut dyn Reflect`, unwrapping `Box<dyn Reflect>`.
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    /// Casts this value to `Box<dyn Reflect>`, unwrapping `Box<dyn Reflect>`.
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>;

    /// Boxes this value.
    ///
    /// ```
    /// use jk_reflect::Reflect;
    ///
    /// let r = 32.into_boxed_reflect();
    /// assert!(r.is::<i32>());
    /// ```
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Builds `Self` from a boxed value of the same type.
    ///
    /// Returns the box back when the type does not match. `Box<dyn Reflect>`
    /// accepts any value.
    #[inline]
    fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>>
    where
        Self: Sized,
    {
        value.take::<Self>()
    }

    /// Returns the [`TypeId`] of the underlying type.
    ///
    /// Unlike [`Any::type_id`], this sees through `Box<dyn Reflect>`.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the [`Identity`] of this value, used for cycle detection.
    #[inline]
    fn reflect_identity(&self) -> Identity {
        Identity::new((self as *const Self).cast::<()>().addr(), self.ty_id())
    }

    /// Replaces this value with `value` if the types match.
    ///
    /// ```
    /// use jk_reflect::Reflect;
    ///
    /// let mut x = 1_u8;
    /// x.set(Box::new(2_u8)).unwrap();
    /// assert_eq!(x, 2);
    /// assert!(x.set(Box::new("no")).is_err());
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns an immutable view of this value by kind.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable struct view, for struct kinds.
    ///
    /// The object loader uses it to assign leftover attributes after
    /// construction.
    #[inline]
    fn as_struct_mut(&mut self) -> Option<&mut dyn Struct> {
        None
    }

    /// Debug formatter driven by the kind view.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reflect_ref() {
            ReflectRef::Struct(value) => {
                let mut debug = f.debug_struct(self.reflect_type_info().type_name());
                if let Some(info) = self.reflect_type_info().as_struct() {
                    for field in info.fields() {
                        if let Some(field_value) = value.field(field.name()) {
                            debug.field(field.name(), &field_value);
                        }
                    }
                }
                debug.finish()
            }
            ReflectRef::Tuple(value) => {
                let mut debug = f.debug_tuple("");
                for index in 0..value.len() {
                    if let Some(item) = value.get(index) {
                        debug.field(&item);
                    }
                }
                debug.finish()
            }
            ReflectRef::List(value) => {
                let mut debug = f.debug_list();
                for index in 0..value.len() {
                    if let Some(item) = value.get(index) {
                        debug.entry(&item);
                    }
                }
                debug.finish()
            }
            ReflectRef::Set(value) => f.debug_set().entries(value.iter()).finish(),
            ReflectRef::Map(value) => f.debug_map().entries(value.iter()).finish(),
            ReflectRef::Enum(value) => {
                let index = value.variant_index();
                match self.reflect_type_info().as_enum() {
                    Some(info) => match info.variant_at(index) {
                        Some(variant) => f.write_str(variant.name()),
                        None => write!(f, "{}#{index}", info.type_name()),
                    },
                    None => write!(f, "#{index}"),
                }
            }
            ReflectRef::Union(value) => match value.member() {
                Some(member) => member.reflect_debug(f),
                None => f.write_str("None"),
            },
            ReflectRef::Pointer(value) => match value {
                Some(pointee) => pointee.reflect_debug(f),
                None => f.write_str("None"),
            },
            ReflectRef::Newtype(value) => f
                .debug_tuple(self.reflect_type_info().type_name())
                .field(&value)
                .finish(),
            ReflectRef::Opaque(_) => write!(f, "Opaque({})", self.reflect_type_path()),
        }
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// ```
    /// # use jk_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    /// assert!(x.is::<i32>());
    /// ```
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// ```
    /// # use jk_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    /// assert_eq!(*x.downcast_ref::<i32>().unwrap(), 10);
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self.as_reflect())
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self.as_reflect_mut())
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        let this = self.into_reflect();
        if !this.is::<T>() {
            return Err(this);
        }
        match <Box<dyn Any>>::downcast::<T>(this) {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type id was checked"),
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// ```
    /// # use jk_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    /// assert_eq!(x.take::<i32>().unwrap(), 10);
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements the [`Reflect`] methods every concrete type writes the same way.
///
/// Leaves `reflect_ref` (and optional overrides) to the caller.
#[doc(hidden)]
#[macro_export]
macro_rules! __impl_reflect_basics {
    () => {
        #[inline]
        fn reflect_type_info(&self) -> &'static $crate::info::TypeInfo {
            <Self as $crate::info::Typed>::type_info()
        }

        #[inline(always)]
        fn as_reflect(&self) -> &dyn $crate::Reflect {
            self
        }

        #[inline(always)]
        fn as_reflect_mut(&mut self) -> &mut dyn $crate::Reflect {
            self
        }

        #[inline(always)]
        fn into_reflect(
            self: ::std::boxed::Box<Self>,
        ) -> ::std::boxed::Box<dyn $crate::Reflect> {
            self
        }

        fn set(
            &mut self,
            value: ::std::boxed::Box<dyn $crate::Reflect>,
        ) -> ::core::result::Result<(), ::std::boxed::Box<dyn $crate::Reflect>> {
            *self = <Self as $crate::Reflect>::from_boxed(value)?;
            ::core::result::Result::Ok(())
        }
    };
}

pub(crate) use crate::__impl_reflect_basics as impl_reflect_basics;
