use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::{GenericParam, Generics, Ident, Path, Type};

use super::TypeAttributes;

/// Everything about the derived type except its shape.
pub(crate) struct ReflectMeta<'a> {
    jk_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
    // Field types, bounded in generic impls.
    active_types: Vec<Type>,
    // Field types built with `Default`, bounded in generic impls.
    default_types: Vec<Type>,
}

impl<'a> ReflectMeta<'a> {
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> syn::Result<Self> {
        for param in &generics.params {
            match param {
                GenericParam::Type(_) => {}
                GenericParam::Lifetime(lt) => {
                    return Err(syn::Error::new_spanned(
                        lt,
                        "reflected types must be 'static, lifetime parameters are not supported",
                    ));
                }
                GenericParam::Const(c) => {
                    return Err(syn::Error::new_spanned(
                        c,
                        "const parameters are not supported",
                    ));
                }
            }
        }

        Ok(Self {
            jk_reflect_path: crate::path::jk_reflect(),
            attrs,
            ident,
            generics,
            active_types: Vec::new(),
            default_types: Vec::new(),
        })
    }

    #[inline]
    pub fn jk_reflect_path(&self) -> &Path {
        &self.jk_reflect_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    pub(super) fn push_active_type(&mut self, ty: &Type) {
        if !self.active_types.contains(ty) {
            self.active_types.push(ty.clone());
        }
    }

    pub(super) fn push_default_type(&mut self, ty: &Type) {
        if !self.default_types.contains(ty) {
            self.default_types.push(ty.clone());
        }
    }

    fn type_params(&self) -> impl Iterator<Item = &Ident> {
        self.generics.type_params().map(|param| &param.ident)
    }

    // -------------------------------------------------------------------------
    // Names

    /// The written type name, `Dog` for `type_path = "zoo::Dog"`.
    pub fn type_ident(&self) -> String {
        match &self.attrs.type_path {
            Some(lit) => {
                let text = lit.value();
                match text.rsplit_once("::") {
                    Some((_, ident)) => ident.to_owned(),
                    None => text,
                }
            }
            None => self.ident.to_string(),
        }
    }

    /// `Option<&'static str>` expression of the module path.
    pub fn module_path(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(lit) => match lit.value().rsplit_once("::") {
                Some((module, _)) => quote!(::core::option::Option::Some(#module)),
                None => quote!(::core::option::Option::None),
            },
            None => quote!(::core::option::Option::Some(::core::module_path!())),
        }
    }

    /// `&'static str` expression of the type path without generics.
    fn base_path(&self) -> TokenStream {
        match &self.attrs.type_path {
            Some(lit) => lit.to_token_stream(),
            None => {
                let ident = self.ident.to_string();
                quote!(::core::concat!(::core::module_path!(), "::", #ident))
            }
        }
    }

    /// Expression building the type path. A `&'static str` literal for
    /// non-generic types, a `String` otherwise.
    pub fn type_path(&self) -> TokenStream {
        let base = self.base_path();
        if self.impl_with_generic() {
            self.with_generic_args(base, "type_path")
        } else {
            base
        }
    }

    /// Same as [`type_path`](Self::type_path) for the short name.
    pub fn type_name(&self) -> TokenStream {
        let ident = self.type_ident();
        if self.impl_with_generic() {
            self.with_generic_args(quote!(#ident), "type_name")
        } else {
            quote!(#ident)
        }
    }

    fn with_generic_args(&self, base: TokenStream, method: &str) -> TokenStream {
        let type_path_ = crate::path::type_path_(&self.jk_reflect_path);
        let concat_ = crate::path::macro_exports_(&self.jk_reflect_path);
        let method = Ident::new(method, Span::call_site());
        let args = self
            .type_params()
            .map(|param| quote!(<#param as #type_path_>::#method()));
        quote! {
            #concat_::concat(&[
                #base,
                "<",
                [#(#args),*].join(", ").as_str(),
                ">",
            ])
        }
    }

    // -------------------------------------------------------------------------
    // Generics

    /// Generics split for an impl block.
    ///
    /// With `reflect_bounds`, type parameters and field types are bounded by
    /// `Reflect + Typed`, otherwise type parameters are bounded by `TypePath`.
    pub fn split_generics(&self, reflect_bounds: bool) -> (TokenStream, TokenStream, TokenStream) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        if !self.impl_with_generic() {
            return (
                impl_generics.to_token_stream(),
                ty_generics.to_token_stream(),
                where_clause.to_token_stream(),
            );
        }

        let path = &self.jk_reflect_path;
        let reflect_ = crate::path::reflect_(path);
        let typed_ = crate::path::typed_(path);
        let type_path_ = crate::path::type_path_(path);

        let existing = where_clause.map(|clause| {
            let predicates = clause.predicates.iter();
            quote!(#(#predicates,)*)
        });

        let params = self.type_params();
        let extra = if reflect_bounds {
            let active = self.active_types.iter();
            let defaults = self.default_types.iter();
            quote! {
                #(#params: #reflect_ + #typed_,)*
                #(#active: #reflect_ + #typed_,)*
                #(#defaults: ::core::default::Default,)*
            }
        } else {
            quote!(#(#params: #type_path_,)*)
        };

        (
            impl_generics.to_token_stream(),
            ty_generics.to_token_stream(),
            quote!(where #existing #extra),
        )
    }
}
