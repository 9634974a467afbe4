//! Paths of `jk_reflect` items used by the generated code.
//!
//! Keeping them here limits the changes when `jk_reflect` is reorganized.
//! The only special one is the path of `jk_reflect` itself, see
//! [`jk_reflect`].

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `jk_reflect` crate.
///
/// 1. For crates that depend on `jk_reflect`, returns `::jk_reflect`.
/// 2. For crates that depend on `jsonkit`, returns `::jsonkit::reflect`.
/// 3. Otherwise returns `::jk_reflect`, which may be incorrect.
///
/// This reads the caller's Cargo.toml, so the path is obtained once per
/// derive and passed around.
pub(crate) fn jk_reflect() -> syn::Path {
    jk_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("jk_reflect"))
}

// -----------------------------------------------------------------------------
// Item Paths

macro_rules! item_paths {
    ($($name:ident => $($seg:ident)::+;)*) => {$(
        #[inline(always)]
        pub(crate) fn $name(jk_reflect_path: &syn::Path) -> TokenStream {
            quote! { #jk_reflect_path $(:: $seg)+ }
        }
    )*};
}

item_paths! {
    reflect_ => Reflect;
    type_path_ => info::TypePath;
    typed_ => info::Typed;
    type_info_ => info::TypeInfo;
    struct_info_ => info::StructInfo;
    named_field_ => info::NamedField;
    property_info_ => info::PropertyInfo;
    class_attr_info_ => info::ClassAttrInfo;
    newtype_info_ => info::NewtypeInfo;
    tuple_info_ => info::TupleInfo;
    enum_info_ => info::EnumInfo;
    variant_info_ => info::VariantInfo;
    enum_value_ => info::EnumValue;
    union_info_ => info::UnionInfo;
    union_member_ => info::UnionMember;
    reflect_ref_ => ops::ReflectRef;
    struct_ => ops::Struct;
    tuple_ => ops::Tuple;
    enum_ => ops::Enum;
    union_ => ops::Union;
    field_values_ => ops::FieldValues;
    extra_fields_ => ops::ExtraFields;
    construct_error_ => ops::ConstructError;
    macro_exports_ => __macro_exports;
    non_generic_type_info_cell_ => __macro_exports::NonGenericTypeInfoCell;
    generic_type_info_cell_ => __macro_exports::GenericTypeInfoCell;
    generic_type_path_cell_ => __macro_exports::GenericTypePathCell;
}

#[cfg(feature = "auto_register")]
item_paths! {
    auto_register_ => __macro_exports::auto_register;
}

/// `Result<Box<dyn Reflect>, ConstructError>`, the return type of every
/// generated constructor.
pub(crate) fn construct_result_(jk_reflect_path: &syn::Path) -> TokenStream {
    let reflect_ = reflect_(jk_reflect_path);
    let construct_error_ = construct_error_(jk_reflect_path);
    quote! {
        ::core::result::Result<::std::boxed::Box<dyn #reflect_>, #construct_error_>
    }
}
