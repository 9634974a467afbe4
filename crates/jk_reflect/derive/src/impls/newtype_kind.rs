use proc_macro2::TokenStream;
use quote::quote;
use syn::Type;

use crate::derive_data::ReflectMeta;

/// Implement `TypePath`, `Typed` and `Reflect` for a single-field tuple struct.
pub(crate) fn impl_newtype(meta: &ReflectMeta, inner: &Type) -> TokenStream {
    let jk_reflect_path = meta.jk_reflect_path();
    let reflect_ = crate::path::reflect_(jk_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(jk_reflect_path);
    let type_info_ = crate::path::type_info_(jk_reflect_path);
    let newtype_info_ = crate::path::newtype_info_(jk_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(jk_reflect_path);
    let construct_result_ = crate::path::construct_result_(jk_reflect_path);

    let type_info = quote! {
        #type_info_::Newtype(#newtype_info_::new::<Self, #inner>(
            |inner: ::std::boxed::Box<dyn #reflect_>| -> #construct_result_ {
                let inner = #macro_exports_::cast_part::<#inner>(inner)?;
                ::core::result::Result::Ok(#reflect_::into_boxed_reflect(Self(inner)))
            },
        ))
    };

    let type_path_impl = super::impl_trait_type_path(meta);
    let typed_impl = super::impl_trait_typed(meta, type_info);
    let reflect_impl = super::impl_trait_reflect(
        meta,
        quote!(#reflect_ref_::Newtype(#reflect_::as_reflect(&self.0))),
        TokenStream::new(),
    );
    let auto_register = super::get_auto_register_impl(meta);

    quote! {
        #type_path_impl

        #typed_impl

        #reflect_impl

        #auto_register
    }
}
