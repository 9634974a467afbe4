//! Runtime views of reflected values, and the plumbing to build them back.
//!
//! ## Views
//!
//! [`ReflectRef`] is the kind-dispatched view returned by
//! [`Reflect::reflect_ref`](crate::Reflect::reflect_ref). Each kind has a
//! subtrait of [`Reflect`](crate::Reflect) with the accessors a dumper needs:
//!
//! - [`Struct`]: named fields, plus an optional map of extra fields.
//! - [`Tuple`]: fixed positions, e.g. `(i32, f32)` or `struct P(i32, i32)`.
//! - [`List`]: e.g. `Vec<i32>`, `[u8; 4]`.
//! - [`Set`]: e.g. `HashSet<String>`.
//! - [`Map`]: e.g. `BTreeMap<String, f64>`.
//! - [`Enum`]: unit variants.
//! - [`Union`]: one member among several, e.g. `Option<T>`.
//!
//! ## Construction
//!
//! Loaders build values through the constructors stored in
//! [`TypeInfo`](crate::info::TypeInfo). Structs take their loaded fields as
//! [`FieldValues`]; failures are [`ConstructError`]s.

// -----------------------------------------------------------------------------
// Modules

mod construct;
mod construct_error;
mod container_ops;
mod enum_ops;
mod kind;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use construct::FieldValues;
pub use construct_error::ConstructError;
pub use container_ops::{List, Map, Set, Tuple};
pub use enum_ops::{Enum, Union};
pub use kind::ReflectRef;
pub use struct_ops::{ExtraFields, Struct};
