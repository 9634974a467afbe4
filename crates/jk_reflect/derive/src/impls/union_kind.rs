use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ReflectMeta, UnionVariant};

/// Implement `TypePath`, `Typed`, `Reflect` and `Union` for an enum whose
/// variants each hold one value, plus at most one unit variant.
pub(crate) fn impl_union(meta: &ReflectMeta, variants: &[UnionVariant]) -> TokenStream {
    let jk_reflect_path = meta.jk_reflect_path();
    let reflect_ = crate::path::reflect_(jk_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(jk_reflect_path);
    let type_info_ = crate::path::type_info_(jk_reflect_path);
    let union_info_ = crate::path::union_info_(jk_reflect_path);
    let union_member_ = crate::path::union_member_(jk_reflect_path);
    let union_ = crate::path::union_(jk_reflect_path);
    let construct_error_ = crate::path::construct_error_(jk_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(jk_reflect_path);
    let construct_result_ = crate::path::construct_result_(jk_reflect_path);

    let members = variants.iter().map(|variant| {
        let name = variant.ident.to_string();
        match variant.payload {
            Some(ty) => quote!(#union_member_::new::<#ty>(#name)),
            None => quote!(#union_member_::none(#name)),
        }
    });

    let from_member_arms = variants.iter().enumerate().map(|(index, variant)| {
        let ident = variant.ident;
        match variant.payload {
            Some(ty) => quote! {
                #index => {
                    let payload = #macro_exports_::cast_part::<#ty>(payload)?;
                    ::core::result::Result::Ok(#reflect_::into_boxed_reflect(Self::#ident(payload)))
                }
            },
            None => quote! {
                #index => ::core::result::Result::Ok(#reflect_::into_boxed_reflect(Self::#ident)),
            },
        }
    });

    let type_info = quote! {
        #type_info_::Union(#union_info_::new::<Self>(
            &[#(#members),*],
            |index: usize, payload: ::std::boxed::Box<dyn #reflect_>| -> #construct_result_ {
                match index {
                    #(#from_member_arms)*
                    _ => ::core::result::Result::Err(#construct_error_::UnknownVariant { index }),
                }
            },
        ))
    };

    let index_arms = variants.iter().enumerate().map(|(index, variant)| {
        let ident = variant.ident;
        match variant.payload {
            Some(_) => quote!(Self::#ident(_) => #index,),
            None => quote!(Self::#ident => #index,),
        }
    });

    let member_arms = variants.iter().map(|variant| {
        let ident = variant.ident;
        match variant.payload {
            Some(_) => quote! {
                Self::#ident(value) => ::core::option::Option::Some(#reflect_::as_reflect(value)),
            },
            None => quote!(Self::#ident => ::core::option::Option::None,),
        }
    });

    let type_path_impl = super::impl_trait_type_path(meta);
    let typed_impl = super::impl_trait_typed(meta, type_info);
    let reflect_impl =
        super::impl_trait_reflect(meta, quote!(#reflect_ref_::Union(self)), TokenStream::new());
    let auto_register = super::get_auto_register_impl(meta);

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        #type_path_impl

        #typed_impl

        #reflect_impl

        impl #impl_generics #union_ for #ident #ty_generics #where_clause {
            #[inline]
            fn member_index(&self) -> usize {
                match self {
                    #(#index_arms)*
                }
            }

            fn member(&self) -> ::core::option::Option<&dyn #reflect_> {
                match self {
                    #(#member_arms)*
                }
            }
        }

        #auto_register
    }
}
