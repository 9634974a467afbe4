use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation codes for `Reflect`.
///
/// - `reflect_ref`: the body of `reflect_ref`, viewing `self` by kind.
/// - `extra_methods`: overrides such as `as_struct_mut`.
pub(crate) fn impl_trait_reflect(
    meta: &ReflectMeta,
    reflect_ref: TokenStream,
    extra_methods: TokenStream,
) -> TokenStream {
    let jk_reflect_path = meta.jk_reflect_path();
    let reflect_ = crate::path::reflect_(jk_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(jk_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(jk_reflect_path);

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #macro_exports_::impl_reflect_basics!();

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref
            }

            #extra_methods
        }
    }
}
