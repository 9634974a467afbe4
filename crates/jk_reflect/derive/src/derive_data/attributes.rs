use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, Ident, Lit, LitStr, Path, Token, Type, parenthesized};

use crate::REFLECT_ATTRIBUTE_NAME;

fn reflect_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(REFLECT_ATTRIBUTE_NAME))
}

fn parse_ident_str(meta: &ParseNestedMeta) -> syn::Result<Ident> {
    let lit: LitStr = meta.value()?.parse()?;
    lit.parse::<Ident>()
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// `#[reflect(...)]` on the type itself.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `type_path = "a::b::Name"`
    pub type_path: Option<LitStr>,
    /// `extends(A, B)`
    pub bases: Vec<Type>,
    /// `property = "method"`, repeatable.
    pub properties: Vec<Ident>,
    /// `class_attr = "CONST"`, repeatable.
    pub class_attrs: Vec<Ident>,
    /// `auto_register`
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in reflect_attrs(attrs) {
            attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("type_path") {
            if self.type_path.is_some() {
                return Err(meta.error("duplicate `type_path`"));
            }
            let lit: LitStr = meta.value()?.parse()?;
            let text = lit.value();
            if text.is_empty() || text.starts_with("::") || text.ends_with("::") {
                return Err(syn::Error::new(
                    lit.span(),
                    "expected a path like `module::Name`",
                ));
            }
            self.type_path = Some(lit);
        } else if meta.path.is_ident("extends") {
            let content;
            parenthesized!(content in meta.input);
            let bases = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
            self.bases.extend(bases);
        } else if meta.path.is_ident("property") {
            self.properties.push(parse_ident_str(&meta)?);
        } else if meta.path.is_ident("class_attr") {
            self.class_attrs.push(parse_ident_str(&meta)?);
        } else if meta.path.is_ident("auto_register") {
            self.auto_register = Some(meta.path.require_ident()?.span());
        } else {
            return Err(meta.error(
                "unknown type attribute, expected one of `type_path`, `extends`, \
                 `property`, `class_attr`, `auto_register`",
            ));
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// How a field gets a value when the input does not provide one.
pub(crate) enum FieldDefault {
    /// Required.
    None,
    /// `Default::default()`
    Trait,
    /// A user function.
    Func(Path),
}

/// `#[reflect(...)]` on a field.
pub(crate) struct FieldAttributes {
    pub default: FieldDefault,
    pub skip: Option<Span>,
    pub extra: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self {
            default: FieldDefault::None,
            skip: None,
            extra: None,
        };
        for attr in reflect_attrs(attrs) {
            attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
        }

        if let Some(span) = this.extra
            && (this.skip.is_some() || !matches!(this.default, FieldDefault::None))
        {
            return Err(syn::Error::new(
                span,
                "`extra` cannot be combined with `skip` or `default`",
            ));
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("default") {
            if meta.input.peek(Token![=]) {
                let lit: LitStr = meta.value()?.parse()?;
                self.default = FieldDefault::Func(lit.parse()?);
            } else {
                self.default = FieldDefault::Trait;
            }
        } else if meta.path.is_ident("skip") {
            self.skip = Some(meta.path.require_ident()?.span());
        } else if meta.path.is_ident("extra") {
            self.extra = Some(meta.path.require_ident()?.span());
        } else {
            return Err(meta.error(
                "unknown field attribute, expected one of `default`, `skip`, `extra`",
            ));
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// VariantAttributes

/// The value a unit variant declares through `#[reflect(value = ...)]`.
#[derive(Clone)]
pub(crate) enum VariantValue {
    Int(i64),
    Str(String),
}

/// `#[reflect(...)]` on an enum variant.
#[derive(Default)]
pub(crate) struct VariantAttributes {
    pub value: Option<VariantValue>,
}

impl VariantAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in reflect_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("value") {
                    let expr: Expr = meta.value()?.parse()?;
                    this.value = Some(parse_variant_value(&expr)?);
                    Ok(())
                } else {
                    Err(meta.error("unknown variant attribute, expected `value`"))
                }
            })?;
        }
        Ok(this)
    }
}

/// Accepts string literals and (possibly negated) integer literals.
pub(crate) fn parse_variant_value(expr: &Expr) -> syn::Result<VariantValue> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(s) => Ok(VariantValue::Str(s.value())),
            Lit::Int(i) => Ok(VariantValue::Int(i.base10_parse()?)),
            other => Err(syn::Error::new(
                other.span(),
                "expected a string or integer literal",
            )),
        },
        Expr::Unary(unary) if matches!(unary.op, syn::UnOp::Neg(_)) => {
            match parse_variant_value(&unary.expr)? {
                VariantValue::Int(v) => Ok(VariantValue::Int(-v)),
                VariantValue::Str(_) => Err(syn::Error::new_spanned(
                    expr,
                    "cannot negate a string value",
                )),
            }
        }
        Expr::Group(group) => parse_variant_value(&group.expr),
        _ => Err(syn::Error::new_spanned(
            expr,
            "expected a string or integer literal",
        )),
    }
}
