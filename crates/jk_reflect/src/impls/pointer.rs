use std::any::TypeId;
use std::sync::{Arc, OnceLock};

use crate::impls::{self, GenericTypeInfoCell, impl_generic_type_path};
use crate::info::{PointerInfo, TypeInfo, Typed};
use crate::ops::{ConstructError, ReflectRef};
use crate::reflection::impl_reflect_basics;
use crate::{Identity, Reflect};

impl_generic_type_path!("alloc::boxed", Box<T>);
impl_generic_type_path!("alloc::sync", Arc<T>);
impl_generic_type_path!("std::sync", OnceLock<T>);

// -----------------------------------------------------------------------------
// Box<T>

fn box_wrap<T: Reflect + Typed>(
    pointee: Option<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, ConstructError> {
    let pointee = pointee.ok_or(ConstructError::MissingValue)?;
    Ok(Box::new(Box::new(impls::cast_part::<T>(pointee)?)))
}

impl<T: Reflect + Typed> Typed for Box<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Pointer(PointerInfo::new::<Self, T>(false, box_wrap::<T>))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Box<T> {
    impl_reflect_basics!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Pointer(Some((**self).as_reflect()))
    }
}

// -----------------------------------------------------------------------------
// Arc<T>

fn arc_wrap<T: Reflect + Typed>(
    pointee: Option<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, ConstructError> {
    let pointee = pointee.ok_or(ConstructError::MissingValue)?;
    Ok(Box::new(Arc::new(impls::cast_part::<T>(pointee)?)))
}

impl<T: Reflect + Typed> Typed for Arc<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Pointer(PointerInfo::new::<Self, T>(false, arc_wrap::<T>))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Arc<T> {
    impl_reflect_basics!();

    /// All clones of one `Arc` share an identity.
    #[inline]
    fn reflect_identity(&self) -> Identity {
        Identity::new(Arc::as_ptr(self).cast::<()>().addr(), TypeId::of::<Self>())
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Pointer(Some((**self).as_reflect()))
    }
}

// -----------------------------------------------------------------------------
// OnceLock<T>

fn once_lock_wrap<T: Reflect + Typed>(
    pointee: Option<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, ConstructError> {
    let lock = OnceLock::new();
    if let Some(pointee) = pointee {
        // The lock is fresh, `set` cannot fail.
        let _ = lock.set(impls::cast_part::<T>(pointee)?);
    }
    Ok(Box::new(lock))
}

impl<T: Reflect + Typed> Typed for OnceLock<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Pointer(PointerInfo::new::<Self, T>(true, once_lock_wrap::<T>))
        })
    }
}

impl<T: Reflect + Typed> Reflect for OnceLock<T> {
    impl_reflect_basics!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Pointer(self.get().map(Reflect::as_reflect))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, OnceLock};

    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::{ConstructError, ReflectRef};

    #[test]
    fn arc_clones_share_identity() {
        let a = Arc::new(String::from("x"));
        let b = Arc::clone(&a);
        assert_eq!(a.reflect_identity(), b.reflect_identity());
    }

    #[test]
    fn once_lock_may_be_empty() {
        let info = <OnceLock<u8>>::type_info().as_pointer().unwrap();
        let empty = info.wrap(None).unwrap();
        let ReflectRef::Pointer(pointee) = empty.reflect_ref() else {
            panic!("not a pointer");
        };
        assert!(pointee.is_none());

        let info = <Box<u8>>::type_info().as_pointer().unwrap();
        assert_eq!(info.wrap(None).unwrap_err(), ConstructError::MissingValue);
        let boxed = info.wrap(Some(Box::new(4_u8))).unwrap();
        assert_eq!(*boxed.take::<Box<u8>>().unwrap(), 4);
    }
}
