use std::any::TypeId;
use std::fmt;

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::{ConstructError, FieldValues};

/// Builds a struct from its loaded field values.
///
/// Fields missing from `values` are an error unless the field has a default.
pub type Constructor = fn(&mut FieldValues) -> Result<Box<dyn Reflect>, ConstructError>;

// -----------------------------------------------------------------------------
// NamedField

/// Information for a named struct field.
///
/// # Examples
///
/// ```
/// use jk_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct Foo {
///     field_a: f32,
///     #[reflect(default)]
///     _cache: u8,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
/// let field = info.field_at(0).unwrap();
/// assert!(field.type_is::<f32>());
/// assert_eq!(field.name(), "field_a");
///
/// let cache = info.field("_cache").unwrap();
/// assert!(cache.is_private());
/// assert!(cache.default_value().is_some());
/// ```
#[derive(Clone)]
pub struct NamedField {
    ty_id: TypeId,
    name: &'static str,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    default: Option<fn() -> Box<dyn Reflect>>,
    variadic: bool,
}

impl NamedField {
    /// Creates a new [`NamedField`] for the given field `name` and type `T`.
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            name,
            type_info: T::type_info,
            default: None,
            variadic: false,
        }
    }

    /// Sets the value used when the field is absent from the input.
    #[inline]
    pub fn with_default(mut self, default: fn() -> Box<dyn Reflect>) -> Self {
        self.default = Some(default);
        self
    }

    /// Marks the field as the slot receiving undeclared attributes.
    ///
    /// Its type must be [`ExtraFields`](crate::ops::ExtraFields).
    #[inline]
    pub fn with_variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Returns the `TypeId`.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: 'static>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns `true` if the field has a default value.
    #[inline]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Produces the default value of the field, if it has one.
    #[inline]
    pub fn default_value(&self) -> Option<Box<dyn Reflect>> {
        self.default.map(|f| f())
    }

    /// Returns `true` for the variadic extras slot.
    #[inline]
    pub const fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Fields starting with one underscore are private.
    #[inline]
    pub fn is_private(&self) -> bool {
        self.name.starts_with('_')
    }

    /// Fields starting with two underscores are internal and never dumped.
    #[inline]
    pub fn is_internal(&self) -> bool {
        self.name.starts_with("__")
    }
}

impl fmt::Debug for NamedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedField")
            .field("name", &self.name)
            .field("default", &self.default.is_some())
            .field("variadic", &self.variadic)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// PropertyInfo

/// A computed, read-only attribute.
///
/// Properties are dumped next to fields unless stripped, and never loaded.
#[derive(Clone, Copy)]
pub struct PropertyInfo {
    name: &'static str,
    getter: fn(&dyn Reflect) -> Option<Box<dyn Reflect>>,
}

impl PropertyInfo {
    /// Creates a property from a getter over the owning value.
    ///
    /// The getter returns `None` when it is handed a value of another type.
    #[inline]
    pub const fn new(
        name: &'static str,
        getter: fn(&dyn Reflect) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self { name, getter }
    }

    /// Returns the property name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Computes the property on `owner`.
    #[inline]
    pub fn get(&self, owner: &dyn Reflect) -> Option<Box<dyn Reflect>> {
        (self.getter)(owner)
    }
}

impl fmt::Debug for PropertyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyInfo").field(&self.name).finish()
    }
}

// -----------------------------------------------------------------------------
// ClassAttrInfo

/// A type-level constant exposed as an attribute.
#[derive(Clone, Copy)]
pub struct ClassAttrInfo {
    name: &'static str,
    value: fn() -> Box<dyn Reflect>,
}

impl ClassAttrInfo {
    /// Creates a class attribute.
    #[inline]
    pub const fn new(name: &'static str, value: fn() -> Box<dyn Reflect>) -> Self {
        Self { name, value }
    }

    /// Returns the attribute name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Produces the attribute value.
    #[inline]
    pub fn value(&self) -> Box<dyn Reflect> {
        (self.value)()
    }
}

impl fmt::Debug for ClassAttrInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassAttrInfo").field(&self.name).finish()
    }
}

// -----------------------------------------------------------------------------
// StructInfo

/// A container for compile-time named struct info.
///
/// Besides fields, a struct may declare computed properties, class-level
/// constants and base types. Bases give the struct a place in the subtype
/// relation registries use for fallback lookups.
///
/// # Examples
///
/// ```
/// use jk_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct Animal {
///     name: String,
/// }
///
/// #[derive(Reflect)]
/// #[reflect(extends(Animal))]
/// struct Dog {
///     name: String,
/// }
///
/// let info = Dog::type_info().as_struct().unwrap();
/// assert_eq!(info.field_len(), 1);
/// assert_eq!(info.index_of("name"), Some(0));
/// assert!(info.extends(std::any::TypeId::of::<Animal>()));
/// ```
#[derive(Clone)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    properties: Box<[PropertyInfo]>,
    class_attrs: Box<[ClassAttrInfo]>,
    bases: Box<[fn() -> &'static TypeInfo]>,
    constructor: Constructor,
}

impl StructInfo {
    impl_type_fn!(ty);

    /// Creates a new [`StructInfo`].
    ///
    /// Fields keep their input order.
    pub fn new<T: TypePath>(fields: &[NamedField], constructor: Constructor) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            properties: Box::new([]),
            class_attrs: Box::new([]),
            bases: Box::new([]),
            constructor,
        }
    }

    /// Sets the computed properties.
    #[inline]
    pub fn with_properties(mut self, properties: &[PropertyInfo]) -> Self {
        self.properties = properties.into();
        self
    }

    /// Sets the class attributes.
    #[inline]
    pub fn with_class_attrs(mut self, class_attrs: &[ClassAttrInfo]) -> Self {
        self.class_attrs = class_attrs.into();
        self
    }

    /// Sets the direct base types.
    #[inline]
    pub fn with_bases(mut self, bases: &[fn() -> &'static TypeInfo]) -> Self {
        self.bases = bases.into();
        self
    }

    /// Returns the fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[NamedField] {
        &self.fields
    }

    /// Returns the [`NamedField`] for the given `name`, if present.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the [`NamedField`] at the given index, if present.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    /// Returns the index for the given field `name`, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the field collecting undeclared attributes, if any.
    pub fn variadic_field(&self) -> Option<&NamedField> {
        self.fields.iter().find(|field| field.is_variadic())
    }

    /// Returns the computed properties.
    #[inline]
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// Returns the class attributes.
    #[inline]
    pub fn class_attrs(&self) -> &[ClassAttrInfo] {
        &self.class_attrs
    }

    /// Returns an iterator over the direct base types.
    pub fn bases(&self) -> impl ExactSizeIterator<Item = &'static TypeInfo> + '_ {
        self.bases.iter().map(|base| base())
    }

    /// Returns `true` if `type_id` is a base of this struct, transitively.
    ///
    /// A type does not extend itself.
    pub fn extends(&self, type_id: TypeId) -> bool {
        self.bases().any(|base| {
            base.type_id() == type_id
                || base.as_struct().is_some_and(|info| info.extends(type_id))
        })
    }

    /// Builds a value of this struct from `values`.
    #[inline]
    pub fn construct(&self, values: &mut FieldValues) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.constructor)(values)
    }
}

impl fmt::Debug for StructInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructInfo")
            .field("ty", &self.ty)
            .field("fields", &self.fields)
            .field("properties", &self.properties)
            .field("class_attrs", &self.class_attrs)
            .field("bases", &self.bases().map(TypeInfo::type_path).collect::<Vec<_>>())
            .finish()
    }
}
