use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{EnumVariant, ReflectMeta, VariantValue};

/// Implement `TypePath`, `Typed`, `Reflect` and `Enum` for an enum of unit
/// variants.
pub(crate) fn impl_enum(meta: &ReflectMeta, variants: &[EnumVariant]) -> TokenStream {
    let jk_reflect_path = meta.jk_reflect_path();
    let reflect_ = crate::path::reflect_(jk_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(jk_reflect_path);
    let type_info_ = crate::path::type_info_(jk_reflect_path);
    let enum_info_ = crate::path::enum_info_(jk_reflect_path);
    let variant_info_ = crate::path::variant_info_(jk_reflect_path);
    let enum_value_ = crate::path::enum_value_(jk_reflect_path);
    let enum_ = crate::path::enum_(jk_reflect_path);

    let variant_infos = variants.iter().map(|variant| {
        let name = variant.ident.to_string();
        let value = match &variant.value {
            VariantValue::Int(v) => quote!(#enum_value_::Int(#v)),
            VariantValue::Str(s) => quote!(#enum_value_::Str(#s)),
        };
        quote!(#variant_info_::new(#name, #value))
    });

    let idents: Vec<_> = variants.iter().map(|variant| variant.ident).collect();
    let indices: Vec<usize> = (0..variants.len()).collect();

    let type_info = quote! {
        #type_info_::Enum(#enum_info_::new::<Self>(
            &[#(#variant_infos),*],
            |index: usize| -> ::core::option::Option<::std::boxed::Box<dyn #reflect_>> {
                match index {
                    #(#indices => ::core::option::Option::Some(#reflect_::into_boxed_reflect(Self::#idents)),)*
                    _ => ::core::option::Option::None,
                }
            },
        ))
    };

    let type_path_impl = super::impl_trait_type_path(meta);
    let typed_impl = super::impl_trait_typed(meta, type_info);
    let reflect_impl =
        super::impl_trait_reflect(meta, quote!(#reflect_ref_::Enum(self)), TokenStream::new());
    let auto_register = super::get_auto_register_impl(meta);

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        #type_path_impl

        #typed_impl

        #reflect_impl

        impl #impl_generics #enum_ for #ident #ty_generics #where_clause {
            #[inline]
            fn variant_index(&self) -> usize {
                match self {
                    #(Self::#idents => #indices,)*
                }
            }
        }

        #auto_register
    }
}
