use std::fmt;

use crate::Reflect;
use crate::info::{Type, TypePath, impl_type_fn};

// -----------------------------------------------------------------------------
// EnumValue

/// The declared value of an enum variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnumValue {
    Int(i64),
    Str(&'static str),
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::Str(v) => f.write_str(v),
        }
    }
}

// -----------------------------------------------------------------------------
// VariantInfo

/// A unit variant: its name and its value.
#[derive(Clone, Copy, Debug)]
pub struct VariantInfo {
    name: &'static str,
    value: EnumValue,
}

impl VariantInfo {
    /// Creates a variant.
    #[inline]
    pub const fn new(name: &'static str, value: EnumValue) -> Self {
        Self { name, value }
    }

    /// Returns the variant name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the variant value.
    #[inline]
    pub const fn value(&self) -> EnumValue {
        self.value
    }
}

// -----------------------------------------------------------------------------
// EnumInfo

/// A container for compile-time info of enums with unit variants only.
///
/// Enums with payloads are unions, see [`UnionInfo`](crate::info::UnionInfo).
///
/// # Examples
///
/// ```
/// use jk_reflect::{derive::Reflect, info::{EnumValue, Typed}};
///
/// #[derive(Reflect)]
/// enum Color {
///     Red,
///     #[reflect(value = "g")]
///     Green,
///     Blue = 7,
/// }
///
/// let info = Color::type_info().as_enum().unwrap();
/// assert_eq!(info.variant_at(0).unwrap().value(), EnumValue::Int(0));
/// assert_eq!(info.variant_by_name("Green").unwrap().value(), EnumValue::Str("g"));
/// assert_eq!(info.index_of_value(&EnumValue::Int(7)), Some(2));
/// ```
#[derive(Clone)]
pub struct EnumInfo {
    ty: Type,
    variants: Box<[VariantInfo]>,
    from_index: fn(usize) -> Option<Box<dyn Reflect>>,
}

impl EnumInfo {
    impl_type_fn!(ty);

    /// Creates a new [`EnumInfo`].
    ///
    /// Variants keep their input order; `from_index` builds the variant at
    /// an index.
    pub fn new<T: TypePath>(
        variants: &[VariantInfo],
        from_index: fn(usize) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            variants: variants.into(),
            from_index,
        }
    }

    /// Returns the variants in declaration order.
    #[inline]
    pub fn variants(&self) -> &[VariantInfo] {
        &self.variants
    }

    /// Returns the [`VariantInfo`] at the given index, if present.
    #[inline]
    pub fn variant_at(&self, index: usize) -> Option<&VariantInfo> {
        self.variants.get(index)
    }

    /// Returns the variant with the given name, if present.
    pub fn variant_by_name(&self, name: &str) -> Option<&VariantInfo> {
        self.variants.iter().find(|v| v.name() == name)
    }

    /// Returns the index of the variant with the given name, if present.
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|v| v.name() == name)
    }

    /// Returns the index of the first variant with the given value, if present.
    pub fn index_of_value(&self, value: &EnumValue) -> Option<usize> {
        self.variants.iter().position(|v| v.value() == *value)
    }

    /// Returns the number of variants.
    #[inline]
    pub fn variant_len(&self) -> usize {
        self.variants.len()
    }

    /// Builds the variant at `index`.
    #[inline]
    pub fn from_index(&self, index: usize) -> Option<Box<dyn Reflect>> {
        (self.from_index)(index)
    }
}

impl fmt::Debug for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumInfo")
            .field("ty", &self.ty)
            .field("variants", &self.variants)
            .finish()
    }
}
