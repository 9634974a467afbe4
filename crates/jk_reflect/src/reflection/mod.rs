// -----------------------------------------------------------------------------
// Modules

mod dynamic;
mod identity;
mod reflect;

// -----------------------------------------------------------------------------
// Exports

pub use identity::Identity;
pub use reflect::Reflect;

pub(crate) use reflect::impl_reflect_basics;
