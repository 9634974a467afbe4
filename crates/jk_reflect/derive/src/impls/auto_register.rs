use crate::derive_data::ReflectMeta;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &ReflectMeta) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    let Some(span) = meta.attrs().auto_register else {
        return proc_macro2::TokenStream::new();
    };

    // Invalid for generic types.
    if meta.impl_with_generic() {
        return proc_macro2::TokenStream::new();
    }

    let jk_reflect_path = meta.jk_reflect_path();
    let auto_register_ = crate::path::auto_register_(jk_reflect_path);
    let typed_ = crate::path::typed_(jk_reflect_path);
    let ident = meta.ident();

    quote_spanned! { span =>
        #auto_register_::inventory::submit! {
            #auto_register_::AutoRegistration::new(<#ident as #typed_>::type_info)
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ReflectMeta) -> proc_macro2::TokenStream {
    proc_macro2::TokenStream::new()
}
