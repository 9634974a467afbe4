use std::any::TypeId;
use std::fmt;

/// The identity of a value in memory: its address paired with its type.
///
/// A struct and its first field can share an address, so the address alone
/// is not enough to tell two live values apart. Pairing it with the
/// [`TypeId`] is: two distinct values of the same type never overlap.
///
/// Shared pointers such as [`Arc`](std::sync::Arc) report the address of the
/// shared allocation, so every clone of one `Arc` has the same identity.
///
/// ```
/// use jk_reflect::Reflect;
/// use std::sync::Arc;
///
/// let a = Arc::new(5_i32);
/// let b = a.clone();
/// assert_eq!(a.reflect_identity(), b.reflect_identity());
/// assert_ne!(a.reflect_identity(), Arc::new(5_i32).reflect_identity());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    addr: usize,
    type_id: TypeId,
}

impl Identity {
    /// Creates an identity from an address and a type.
    #[inline]
    pub const fn new(addr: usize, type_id: TypeId) -> Self {
        Self { addr, type_id }
    }

    /// Returns the address part.
    #[inline]
    pub const fn addr(&self) -> usize {
        self.addr
    }

    /// Returns the type part.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({:#x}, {:?})", self.addr, self.type_id)
    }
}
