//! Provide some tools for parsing token stream.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod reflect_derive;
mod reflect_meta;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, FieldDefault, TypeAttributes};
pub(crate) use attributes::{VariantAttributes, VariantValue};

pub(crate) use reflect_derive::{EnumVariant, ReflectDerive, StructField, UnionVariant};
pub(crate) use reflect_meta::ReflectMeta;
