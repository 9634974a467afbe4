//! Small shared utilities for the `jsonkit` crates.
//!
//! - [`hash`]: hash containers with a fixed, process-independent seed.
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](std::any::TypeId).

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
