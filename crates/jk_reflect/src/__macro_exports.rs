//! Items used by the code the derive macro generates. Not public API.

pub use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};
pub use crate::impls::{cast_part, concat};

pub use crate::__impl_reflect_basics as impl_reflect_basics;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use crate::auto_register::AutoRegistration;
    pub use inventory;
}
