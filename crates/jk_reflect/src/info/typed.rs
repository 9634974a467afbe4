use crate::info::{TypeInfo, TypePath};

/// A static accessor to compile-time type information.
///
/// Implemented by the derive macro and for the std types in
/// [`impls`](crate::impls). The info lives in a static cell, so repeated
/// calls return the same reference.
///
/// ```
/// use jk_reflect::info::{ReflectKind, Typed};
///
/// let info = <Option<i32>>::type_info();
/// assert_eq!(info.kind(), ReflectKind::Union);
/// assert!(info.accepts_none());
/// assert!(std::ptr::eq(info, <Option<i32>>::type_info()));
/// ```
pub trait Typed: TypePath {
    /// Returns the compile-time info for the underlying type.
    fn type_info() -> &'static TypeInfo;
}
