use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation codes for `Typed`.
///
/// `type_info` is an expression of type `TypeInfo`, evaluated once per type.
pub(crate) fn impl_trait_typed(meta: &ReflectMeta, type_info: TokenStream) -> TokenStream {
    let jk_reflect_path = meta.jk_reflect_path();
    let typed_ = crate::path::typed_(jk_reflect_path);
    let type_info_ = crate::path::type_info_(jk_reflect_path);

    let ident = meta.ident();

    let body = if meta.impl_with_generic() {
        let cell_ = crate::path::generic_type_info_cell_(jk_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info
            })
        }
    } else {
        let cell_ = crate::path::non_generic_type_info_cell_(jk_reflect_path);
        quote! {
            static CELL: #cell_ = #cell_::new();
            CELL.get_or_init(|| {
                #type_info
            })
        }
    };

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #body
            }
        }
    }
}
