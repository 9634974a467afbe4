use std::path::PathBuf;
use std::time::Duration;

/// Implements `TypePath`, `Typed` and `Reflect` for a leaf type.
macro_rules! impl_reflect_opaque {
    ($ty:ty => $path:expr, $name:expr, $ident:expr, $module:expr) => {
        impl $crate::info::TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn type_ident() -> &'static str {
                $ident
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                $module
            }
        }

        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::impls::NonGenericTypeInfoCell =
                    $crate::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Opaque($crate::info::OpaqueInfo::new::<Self>())
                })
            }
        }

        impl $crate::Reflect for $ty {
            $crate::reflection::impl_reflect_basics!();

            #[inline]
            fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
                $crate::ops::ReflectRef::Opaque(self)
            }

            #[inline]
            fn reflect_debug(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Debug::fmt(self, f)
            }
        }
    };
    ($ty:ty => $path:expr, $name:expr, $module:expr) => {
        impl_reflect_opaque!($ty => $path, $name, $name, $module);
    };
    ($($ty:ident),+ $(,)?) => {
        $(impl_reflect_opaque!($ty => stringify!($ty), stringify!($ty), None);)+
    };
}

pub(crate) use impl_reflect_opaque;

impl_reflect_opaque!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl_reflect_opaque!(() => "()", "()", None);
impl_reflect_opaque!(&'static str => "&str", "&str", None);
impl_reflect_opaque!(String => "alloc::string::String", "String", Some("alloc::string"));
impl_reflect_opaque!(PathBuf => "std::path::PathBuf", "PathBuf", Some("std::path"));
impl_reflect_opaque!(Duration => "core::time::Duration", "Duration", Some("core::time"));
impl_reflect_opaque!(serde_json::Value => "serde_json::Value", "Value", Some("serde_json"));

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath, Typed};

    #[test]
    fn leaf_names() {
        assert_eq!(i64::type_path(), "i64");
        assert_eq!(i64::module_path(), None);
        assert_eq!(String::type_ident(), "String");
        assert_eq!(String::module_path(), Some("alloc::string"));
        assert_eq!(serde_json::Value::type_path(), "serde_json::Value");
    }

    #[test]
    fn leaves_are_opaque() {
        assert_eq!(f32::type_info().kind(), ReflectKind::Opaque);
        assert_eq!(1.5_f64.reflect_kind(), ReflectKind::Opaque);
        assert_eq!(format!("{:?}", "x".into_boxed_reflect()), "\"x\"");
    }
}
