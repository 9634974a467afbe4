use proc_macro2::TokenStream;
use quote::quote;
use syn::{Index, Type};

use crate::derive_data::ReflectMeta;

/// Implement `TypePath`, `Typed`, `Reflect` and `Tuple` for a tuple struct
/// with several fields.
pub(crate) fn impl_tuple(meta: &ReflectMeta, fields: &[&Type]) -> TokenStream {
    let jk_reflect_path = meta.jk_reflect_path();
    let reflect_ = crate::path::reflect_(jk_reflect_path);
    let typed_ = crate::path::typed_(jk_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(jk_reflect_path);
    let type_info_ = crate::path::type_info_(jk_reflect_path);
    let tuple_info_ = crate::path::tuple_info_(jk_reflect_path);
    let tuple_ = crate::path::tuple_(jk_reflect_path);
    let construct_error_ = crate::path::construct_error_(jk_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(jk_reflect_path);
    let construct_result_ = crate::path::construct_result_(jk_reflect_path);

    let len = fields.len();
    let indices: Vec<Index> = (0..len).map(Index::from).collect();

    let parts = fields.iter().zip(&indices).map(|(ty, index)| {
        quote! {
            match items.next() {
                ::core::option::Option::Some(item) => #macro_exports_::cast_part::<#ty>(item)?,
                ::core::option::Option::None => {
                    return ::core::result::Result::Err(#construct_error_::InvalidLength {
                        expected: #len,
                        found: #index,
                    });
                }
            }
        }
    });

    let type_info = quote! {
        #type_info_::Tuple(#tuple_info_::new::<Self>(
            &[#(<#fields as #typed_>::type_info),*],
            |items: ::std::vec::Vec<::std::boxed::Box<dyn #reflect_>>| -> #construct_result_ {
                if items.len() != #len {
                    return ::core::result::Result::Err(#construct_error_::InvalidLength {
                        expected: #len,
                        found: items.len(),
                    });
                }
                let mut items = items.into_iter();
                ::core::result::Result::Ok(#reflect_::into_boxed_reflect(Self(#(#parts),*)))
            },
        ))
    };

    let type_path_impl = super::impl_trait_type_path(meta);
    let typed_impl = super::impl_trait_typed(meta, type_info);
    let reflect_impl =
        super::impl_trait_reflect(meta, quote!(#reflect_ref_::Tuple(self)), TokenStream::new());
    let auto_register = super::get_auto_register_impl(meta);

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        #type_path_impl

        #typed_impl

        #reflect_impl

        impl #impl_generics #tuple_ for #ident #ty_generics #where_clause {
            #[inline]
            fn len(&self) -> usize {
                #len
            }

            fn get(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(#reflect_::as_reflect(&self.#indices)),)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        #auto_register
    }
}
