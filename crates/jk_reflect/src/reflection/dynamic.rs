use std::any::TypeId;
use std::fmt;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{DynamicInfo, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectRef, Struct};
use crate::reflection::Identity;

// -----------------------------------------------------------------------------
// Box<dyn Reflect>

impl TypePath for Box<dyn Reflect> {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::boxed::Box<dyn jk_reflect::Reflect>"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Box<dyn Reflect>"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Box"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::boxed")
    }
}

impl Typed for Box<dyn Reflect> {
    /// The static info of the box itself: [`TypeInfo::Dynamic`].
    ///
    /// A boxed value reports the info of its content through
    /// [`Reflect::reflect_type_info`].
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Dynamic(DynamicInfo::new::<Self>()))
    }
}

impl Reflect for Box<dyn Reflect> {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        (**self).reflect_type_info()
    }

    #[inline]
    fn as_reflect(&self) -> &dyn Reflect {
        (**self).as_reflect()
    }

    #[inline]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect {
        (**self).as_reflect_mut()
    }

    #[inline]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect> {
        (*self).into_reflect()
    }

    #[inline]
    fn from_boxed(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        Ok(value.into_reflect())
    }

    #[inline]
    fn ty_id(&self) -> TypeId {
        (**self).ty_id()
    }

    #[inline]
    fn reflect_identity(&self) -> Identity {
        (**self).reflect_identity()
    }

    #[inline]
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.into_reflect();
        Ok(())
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        (**self).reflect_ref()
    }

    #[inline]
    fn as_struct_mut(&mut self) -> Option<&mut dyn Struct> {
        (**self).as_struct_mut()
    }

    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).reflect_debug(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};

    #[test]
    fn boxed_values_are_transparent() {
        let boxed: Box<dyn Reflect> = Box::new(String::from("a"));
        let value: &dyn Reflect = &boxed;

        assert_eq!(value.reflect_kind(), ReflectKind::Opaque);
        assert_eq!(value.reflect_identity(), boxed.as_reflect().reflect_identity());
        assert_eq!(value.downcast_ref::<String>().unwrap(), "a");
        assert!(<Box<dyn Reflect>>::type_info().is_dynamic());
    }

    #[test]
    fn set_replaces_the_content() {
        let mut boxed: Box<dyn Reflect> = Box::new(1_u8);
        boxed.set(Box::new("text")).unwrap();
        assert!(boxed.is::<&'static str>());
    }
}
