//! Compile-time type metadata and runtime views for `jsonkit`.
//!
//! The dump/load engine never inspects values through language magic. Every
//! type it can handle describes itself through this crate:
//!
//! - [`info::TypePath`]: stable names, used as registry keys.
//! - [`info::Typed`]: a static [`TypeInfo`](info::TypeInfo), the sum over
//!   kinds (struct, list, map, union, ...) carrying the constructors needed
//!   to build a value back from loaded parts.
//! - [`Reflect`]: object-safe access to a value, viewed by kind through
//!   [`ReflectRef`](ops::ReflectRef).
//!
//! Implementations are provided for primitives, `String`, std collections,
//! tuples, `Option`, smart pointers, `serde_json::Value` and (with the
//! `chrono` feature) chrono's date and time types. User types use the derive
//! macro.
//!
//! # Examples
//!
//! ```
//! use jk_reflect::{Reflect, derive::Reflect, ops::ReflectRef, info::Typed};
//!
//! #[derive(Reflect)]
//! struct Car {
//!     color: String,
//! }
//!
//! let info = Car::type_info().as_struct().unwrap();
//! assert_eq!(info.field_at(0).unwrap().name(), "color");
//!
//! let car = Car { color: "Red".into() };
//! let ReflectRef::Struct(view) = car.reflect_ref() else { unreachable!() };
//! let color = view.field("color").unwrap();
//! assert_eq!(color.downcast_ref::<String>().unwrap(), "Red");
//! ```

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro resolves this crate through the caller's Cargo.toml, which
// yields `::jk_reflect` for the crate itself (tests, doctests).
extern crate self as jk_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod auto_register;
pub mod impls;
pub mod info;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use jk_reflect_derive as derive;
pub use reflection::{Identity, Reflect};
