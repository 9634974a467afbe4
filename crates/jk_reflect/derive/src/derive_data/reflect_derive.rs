use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, Type};

use super::attributes::parse_variant_value;
use super::{FieldAttributes, FieldDefault, ReflectMeta, TypeAttributes, VariantAttributes, VariantValue};

// -----------------------------------------------------------------------------
// Parts

/// A reflected named field.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    /// The field name as seen at runtime, without `r#`.
    pub name: String,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

/// A unit variant of a plain enum.
pub(crate) struct EnumVariant<'a> {
    pub ident: &'a Ident,
    pub value: VariantValue,
}

/// A variant of a union-like enum.
pub(crate) struct UnionVariant<'a> {
    pub ident: &'a Ident,
    /// `None` for the unit "no value" variant.
    pub payload: Option<&'a Type>,
}

// -----------------------------------------------------------------------------
// ReflectDerive

/// The derived type, classified by shape.
pub(crate) enum ReflectDerive<'a> {
    /// Named or unit struct.
    Struct(ReflectMeta<'a>, Vec<StructField<'a>>),
    /// Tuple struct with one field.
    Newtype(ReflectMeta<'a>, &'a Type),
    /// Tuple struct with several fields.
    Tuple(ReflectMeta<'a>, Vec<&'a Type>),
    /// Enum of unit variants.
    Enum(ReflectMeta<'a>, Vec<EnumVariant<'a>>),
    /// Enum of single-value variants and at most one unit variant.
    Union(ReflectMeta<'a>, Vec<UnionVariant<'a>>),
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let mut meta = ReflectMeta::new(attrs, &input.ident, &input.generics)?;

        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => {
                    let mut fields = Vec::with_capacity(named.named.len());
                    let mut extra_seen = false;
                    for field in &named.named {
                        let ident = field.ident.as_ref().ok_or_else(|| {
                            syn::Error::new(field.span(), "expected a named field")
                        })?;
                        let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
                        if let Some(span) = attrs.extra {
                            if extra_seen {
                                return Err(syn::Error::new(span, "only one `extra` field is allowed"));
                            }
                            extra_seen = true;
                        }
                        if attrs.skip.is_some() || matches!(attrs.default, FieldDefault::Trait) {
                            meta.push_default_type(&field.ty);
                        }
                        if attrs.skip.is_none() {
                            meta.push_active_type(&field.ty);
                        }
                        fields.push(StructField {
                            ident,
                            name: ident.unraw().to_string(),
                            ty: &field.ty,
                            attrs,
                        });
                    }
                    Ok(Self::Struct(meta, fields))
                }
                Fields::Unit => Ok(Self::Struct(meta, Vec::new())),
                Fields::Unnamed(unnamed) => {
                    for field in &unnamed.unnamed {
                        FieldAttributes::parse_attrs(&field.attrs)?;
                        meta.push_active_type(&field.ty);
                    }
                    let types: Vec<&Type> = unnamed.unnamed.iter().map(|field| &field.ty).collect();
                    match types.as_slice() {
                        [] => Ok(Self::Struct(meta, Vec::new())),
                        [inner] => Ok(Self::Newtype(meta, inner)),
                        _ => Ok(Self::Tuple(meta, types)),
                    }
                }
            },
            Data::Enum(data) => {
                if data.variants.is_empty() {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "cannot reflect an enum without variants",
                    ));
                }

                let all_unit = data.variants.iter().all(|v| matches!(v.fields, Fields::Unit));
                if all_unit {
                    let mut variants = Vec::with_capacity(data.variants.len());
                    let mut discriminant: i64 = 0;
                    for variant in &data.variants {
                        if let Some((_, expr)) = &variant.discriminant {
                            match parse_variant_value(expr)? {
                                VariantValue::Int(v) => discriminant = v,
                                VariantValue::Str(_) => {
                                    return Err(syn::Error::new_spanned(expr, "expected an integer"));
                                }
                            }
                        }
                        let attrs = VariantAttributes::parse_attrs(&variant.attrs)?;
                        variants.push(EnumVariant {
                            ident: &variant.ident,
                            value: attrs.value.unwrap_or(VariantValue::Int(discriminant)),
                        });
                        discriminant = discriminant.wrapping_add(1);
                    }
                    return Ok(Self::Enum(meta, variants));
                }

                let mut variants = Vec::with_capacity(data.variants.len());
                let mut none_seen = false;
                for variant in &data.variants {
                    VariantAttributes::parse_attrs(&variant.attrs)?;
                    match &variant.fields {
                        Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => {
                            let ty = &unnamed.unnamed[0].ty;
                            meta.push_active_type(ty);
                            variants.push(UnionVariant {
                                ident: &variant.ident,
                                payload: Some(ty),
                            });
                        }
                        Fields::Unit if !none_seen => {
                            none_seen = true;
                            variants.push(UnionVariant {
                                ident: &variant.ident,
                                payload: None,
                            });
                        }
                        _ => {
                            return Err(syn::Error::new(
                                variant.span(),
                                "expected a variant holding exactly one value; enums mixing \
                                 payloads allow a single unit variant",
                            ));
                        }
                    }
                }
                Ok(Self::Union(meta, variants))
            }
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span,
                "reflection is not supported for `union`",
            )),
        }
    }
}
