//! Static registration of reflected types.
//!
//! Non-generic types deriving `Reflect` with `#[reflect(auto_register)]`
//! submit their [`TypeInfo`] at link time through the [`inventory`] crate.
//! Consumers (the engine's default namespace) read them back with
//! [`registered_types`] to resolve type names found in input metadata.
//!
//! Not every platform supports it, although the major ones do. Where it is
//! unsupported, or without the `auto_register` feature, [`registered_types`]
//! is empty and nothing fails.
//!
//! [`inventory`]: https://docs.rs/inventory

use crate::info::TypeInfo;

/// An entry submitted by `#[reflect(auto_register)]`.
#[cfg(feature = "auto_register")]
pub struct AutoRegistration(fn() -> &'static TypeInfo);

#[cfg(feature = "auto_register")]
impl AutoRegistration {
    /// Wraps the type info accessor of a type.
    #[inline]
    pub const fn new(type_info: fn() -> &'static TypeInfo) -> Self {
        Self(type_info)
    }

    /// Returns the [`TypeInfo`] of the registered type.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.0)()
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(AutoRegistration);

/// Returns the info of every auto-registered type.
///
/// ```
/// use jk_reflect::{auto_register, derive::Reflect};
///
/// #[derive(Reflect)]
/// #[reflect(auto_register)]
/// struct Registered {
///     id: u32,
/// }
///
/// let found = auto_register::registered_types()
///     .iter()
///     .any(|info| info.is::<Registered>());
/// assert_eq!(found, cfg!(feature = "auto_register"));
/// ```
pub fn registered_types() -> Vec<&'static TypeInfo> {
    #[cfg(feature = "auto_register")]
    {
        inventory::iter::<AutoRegistration>
            .into_iter()
            .map(AutoRegistration::type_info)
            .collect()
    }
    #[cfg(not(feature = "auto_register"))]
    {
        Vec::new()
    }
}
