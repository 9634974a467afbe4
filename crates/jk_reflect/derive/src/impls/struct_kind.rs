use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{FieldDefault, ReflectMeta, StructField};

/// Implement `TypePath`, `Typed`, `Reflect` and `Struct` for a named or unit
/// struct.
pub(crate) fn impl_struct(meta: &ReflectMeta, fields: &[StructField]) -> TokenStream {
    let jk_reflect_path = meta.jk_reflect_path();
    let struct_ = crate::path::struct_(jk_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(jk_reflect_path);

    let type_path_impl = super::impl_trait_type_path(meta);
    let typed_impl = super::impl_trait_typed(meta, struct_info_expression(meta, fields));
    let reflect_impl = super::impl_trait_reflect(
        meta,
        quote!(#reflect_ref_::Struct(self)),
        quote! {
            #[inline]
            fn as_struct_mut(&mut self) -> ::core::option::Option<&mut dyn #struct_> {
                ::core::option::Option::Some(self)
            }
        },
    );
    let struct_impl = impl_struct_trait(meta, fields);
    let auto_register = super::get_auto_register_impl(meta);

    quote! {
        #type_path_impl

        #typed_impl

        #reflect_impl

        #struct_impl

        #auto_register
    }
}

fn visible<'a, 'b>(fields: &'a [StructField<'b>]) -> impl Iterator<Item = &'a StructField<'b>> {
    fields.iter().filter(|field| field.attrs.skip.is_none())
}

/// `TypeInfo::Struct(StructInfo::new::<Self>(&[..], |values| ..))` and the
/// builder calls for properties, class attributes and bases.
fn struct_info_expression(meta: &ReflectMeta, fields: &[StructField]) -> TokenStream {
    let jk_reflect_path = meta.jk_reflect_path();
    let reflect_ = crate::path::reflect_(jk_reflect_path);
    let typed_ = crate::path::typed_(jk_reflect_path);
    let type_info_ = crate::path::type_info_(jk_reflect_path);
    let struct_info_ = crate::path::struct_info_(jk_reflect_path);
    let named_field_ = crate::path::named_field_(jk_reflect_path);
    let property_info_ = crate::path::property_info_(jk_reflect_path);
    let class_attr_info_ = crate::path::class_attr_info_(jk_reflect_path);
    let field_values_ = crate::path::field_values_(jk_reflect_path);
    let construct_result_ = crate::path::construct_result_(jk_reflect_path);

    let named_fields = visible(fields).map(|field| {
        let name = &field.name;
        let ty = field.ty;
        let with_default = match &field.attrs.default {
            FieldDefault::None => None,
            FieldDefault::Trait => Some(quote! {
                .with_default(|| #reflect_::into_boxed_reflect(<#ty as ::core::default::Default>::default()))
            }),
            FieldDefault::Func(func) => Some(quote! {
                .with_default(|| <#ty as #reflect_>::into_boxed_reflect(#func()))
            }),
        };
        let with_variadic = field.attrs.extra.map(|_| quote!(.with_variadic()));
        quote! {
            #named_field_::new::<#ty>(#name) #with_default #with_variadic
        }
    });

    let field_inits = fields.iter().map(|field| {
        let ident = field.ident;
        let name = &field.name;
        let ty = field.ty;
        let value = if field.attrs.skip.is_some() {
            quote!(::core::default::Default::default())
        } else if field.attrs.extra.is_some() {
            quote!(values.take_or_default::<#ty>(#name)?)
        } else {
            match &field.attrs.default {
                FieldDefault::None => quote!(values.take::<#ty>(#name)?),
                FieldDefault::Trait => quote!(values.take_or_default::<#ty>(#name)?),
                FieldDefault::Func(func) => {
                    quote!(values.take_optional::<#ty>(#name)?.unwrap_or_else(#func))
                }
            }
        };
        quote!(#ident: #value)
    });

    // Braces also build unit structs.
    let construct = quote!(Self { #(#field_inits,)* });

    let attrs = meta.attrs();

    let with_properties = (!attrs.properties.is_empty()).then(|| {
        let properties = attrs.properties.iter().map(|method| {
            let name = method.to_string();
            quote! {
                #property_info_::new(#name, |owner: &dyn #reflect_| {
                    owner
                        .downcast_ref::<Self>()
                        .map(|this| #reflect_::into_boxed_reflect(this.#method()))
                })
            }
        });
        quote!(.with_properties(&[#(#properties),*]))
    });

    let with_class_attrs = (!attrs.class_attrs.is_empty()).then(|| {
        let class_attrs = attrs.class_attrs.iter().map(|constant| {
            let name = constant.to_string();
            quote! {
                #class_attr_info_::new(#name, || #reflect_::into_boxed_reflect(Self::#constant))
            }
        });
        quote!(.with_class_attrs(&[#(#class_attrs),*]))
    });

    let with_bases = (!attrs.bases.is_empty()).then(|| {
        let bases = attrs.bases.iter();
        quote!(.with_bases(&[#(<#bases as #typed_>::type_info),*]))
    });

    quote! {
        #type_info_::Struct(
            #struct_info_::new::<Self>(
                &[#(#named_fields),*],
                |values: &mut #field_values_| -> #construct_result_ {
                    ::core::result::Result::Ok(#reflect_::into_boxed_reflect(#construct))
                },
            )
            #with_properties
            #with_class_attrs
            #with_bases
        )
    }
}

fn impl_struct_trait(meta: &ReflectMeta, fields: &[StructField]) -> TokenStream {
    let jk_reflect_path = meta.jk_reflect_path();
    let reflect_ = crate::path::reflect_(jk_reflect_path);
    let struct_ = crate::path::struct_(jk_reflect_path);
    let extra_fields_ = crate::path::extra_fields_(jk_reflect_path);

    let names: Vec<&String> = visible(fields).map(|field| &field.name).collect();
    let idents: Vec<_> = visible(fields).map(|field| field.ident).collect();

    let extras = fields
        .iter()
        .find(|field| field.attrs.extra.is_some())
        .map(|field| {
            let ident = field.ident;
            quote! {
                #[inline]
                fn extras(&self) -> ::core::option::Option<&#extra_fields_> {
                    ::core::option::Option::Some(&self.#ident)
                }

                #[inline]
                fn extras_mut(&mut self) -> ::core::option::Option<&mut #extra_fields_> {
                    ::core::option::Option::Some(&mut self.#ident)
                }
            }
        });

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(true);

    quote! {
        impl #impl_generics #struct_ for #ident #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn #reflect_> {
                match name {
                    #(#names => ::core::option::Option::Some(#reflect_::as_reflect(&self.#idents)),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn #reflect_> {
                match name {
                    #(#names => ::core::option::Option::Some(#reflect_::as_reflect_mut(&mut self.#idents)),)*
                    _ => ::core::option::Option::None,
                }
            }

            #extras
        }
    }
}
