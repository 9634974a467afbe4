// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod enum_kind;
mod newtype_kind;
mod struct_kind;
mod trait_reflect;
mod trait_type_path;
mod trait_typed;
mod tuple_kind;
mod union_kind;

use auto_register::get_auto_register_impl;
use trait_reflect::impl_trait_reflect;
use trait_type_path::impl_trait_type_path;
use trait_typed::impl_trait_typed;

// -----------------------------------------------------------------------------
// Entry

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::ReflectDerive;

/// Provided for `#[derive(Reflect)]`.
pub(crate) fn match_reflect_impls(ast: DeriveInput) -> TokenStream {
    // Parse type kind, attributes and fields.
    let reflect_derive = match ReflectDerive::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let reflect_impls = match &reflect_derive {
        ReflectDerive::Struct(meta, fields) => struct_kind::impl_struct(meta, fields),
        ReflectDerive::Newtype(meta, inner) => newtype_kind::impl_newtype(meta, inner),
        ReflectDerive::Tuple(meta, fields) => tuple_kind::impl_tuple(meta, fields),
        ReflectDerive::Enum(meta, variants) => enum_kind::impl_enum(meta, variants),
        ReflectDerive::Union(meta, variants) => union_kind::impl_union(meta, variants),
    };

    TokenStream::from(quote! {
        const _: () = {
            #reflect_impls
        };
    })
}
