use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

fn static_path_cell(jk_reflect_path: &syn::Path, generator: TokenStream) -> TokenStream {
    let path_cell_ = crate::path::generic_type_path_cell_(jk_reflect_path);

    quote! {
        static CELL: #path_cell_ = #path_cell_::new();
        CELL.get_or_insert::<Self>(|| {
            #generator
        })
    }
}

/// Generate implementation codes for `TypePath`
pub(crate) fn impl_trait_type_path(meta: &ReflectMeta) -> TokenStream {
    let jk_reflect_path = meta.jk_reflect_path();
    let type_path_ = crate::path::type_path_(jk_reflect_path);

    let ident = meta.ident();

    let (type_path, type_name) = if meta.impl_with_generic() {
        (
            static_path_cell(jk_reflect_path, meta.type_path()),
            static_path_cell(jk_reflect_path, meta.type_name()),
        )
    } else {
        (meta.type_path(), meta.type_name())
    };

    let type_ident = meta.type_ident();
    let module_path = meta.module_path();

    let (impl_generics, ty_generics, where_clause) = meta.split_generics(false);

    quote! {
        impl #impl_generics #type_path_ for #ident #ty_generics #where_clause {
            fn type_path() -> &'static str {
                #type_path
            }

            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #type_ident
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                #module_path
            }
        }
    }
}
