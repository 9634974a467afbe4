use crate::info::{Type, TypePath, impl_type_fn};

/// Metadata for types whose internals are opaque to the reflection system.
///
/// "Opaque" means the type's internal representation is not exposed, for
/// example primitive types like `u64` or heap-backed types like `String`.
/// Converters handle them as a whole.
#[derive(Debug, Clone)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    impl_type_fn!(ty);

    /// Create a new [`OpaqueInfo`].
    #[inline]
    pub fn new<T: TypePath + ?Sized>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}

/// Metadata for `Box<dyn Reflect>`, a slot holding any reflected value.
///
/// Loading into a dynamic slot needs the concrete type from somewhere else:
/// meta hints or the shape of the input.
#[derive(Debug, Clone)]
pub struct DynamicInfo {
    ty: Type,
}

impl DynamicInfo {
    impl_type_fn!(ty);

    /// Create a new [`DynamicInfo`].
    #[inline]
    pub fn new<T: TypePath + ?Sized>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}
