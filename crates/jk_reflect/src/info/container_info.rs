use std::fmt;

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::ConstructError;

/// Builds a container from its loaded items, in order.
pub type FromItems = fn(Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError>;

/// Builds a mapping from its loaded entries, in order.
pub type FromEntries =
    fn(Vec<(Box<dyn Reflect>, Box<dyn Reflect>)>) -> Result<Box<dyn Reflect>, ConstructError>;

// -----------------------------------------------------------------------------
// ListInfo

/// A container for compile-time list-like info.
///
/// Covers `Vec`, `VecDeque` and arrays; arrays carry a fixed length.
///
/// # Examples
///
/// ```
/// use jk_reflect::info::Typed;
///
/// let info = <Vec<i32> as Typed>::type_info().as_list().unwrap();
/// assert!(info.item_info().is::<i32>());
/// assert_eq!(info.fixed_len(), None);
///
/// let info = <[u8; 3] as Typed>::type_info().as_list().unwrap();
/// assert_eq!(info.fixed_len(), Some(3));
/// ```
#[derive(Clone)]
pub struct ListInfo {
    ty: Type,
    // `TypeInfo` is created on the first visit, use function pointers to delay it.
    item: fn() -> &'static TypeInfo,
    fixed_len: Option<usize>,
    from_items: FromItems,
}

impl ListInfo {
    impl_type_fn!(ty);

    /// Creates a new [`ListInfo`].
    #[inline]
    pub fn new<TList: TypePath, TItem: Typed>(from_items: FromItems) -> Self {
        Self {
            ty: Type::of::<TList>(),
            item: TItem::type_info,
            fixed_len: None,
            from_items,
        }
    }

    /// Sets the fixed length of an array type.
    #[inline]
    pub fn with_fixed_len(mut self, len: usize) -> Self {
        self.fixed_len = Some(len);
        self
    }

    /// Returns the [`TypeInfo`] of list items.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item)()
    }

    /// Returns the required length, for arrays.
    #[inline]
    pub const fn fixed_len(&self) -> Option<usize> {
        self.fixed_len
    }

    /// Builds a list from `items`.
    #[inline]
    pub fn from_items(&self, items: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.from_items)(items)
    }
}

// -----------------------------------------------------------------------------
// SetInfo

/// A container for compile-time set-like info.
///
/// ```
/// use std::collections::BTreeSet;
/// use jk_reflect::info::Typed;
///
/// let info = <BTreeSet<String> as Typed>::type_info().as_set().unwrap();
/// assert!(info.item_info().is::<String>());
/// ```
#[derive(Clone)]
pub struct SetInfo {
    ty: Type,
    item: fn() -> &'static TypeInfo,
    from_items: FromItems,
}

impl SetInfo {
    impl_type_fn!(ty);

    /// Creates a new [`SetInfo`].
    #[inline]
    pub fn new<TSet: TypePath, TItem: Typed>(from_items: FromItems) -> Self {
        Self {
            ty: Type::of::<TSet>(),
            item: TItem::type_info,
            from_items,
        }
    }

    /// Returns the [`TypeInfo`] of set items.
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item)()
    }

    /// Builds a set from `items`. Duplicates collapse.
    #[inline]
    pub fn from_items(&self, items: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.from_items)(items)
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// A container for compile-time map-like info.
///
/// ```
/// use std::collections::HashMap;
/// use jk_reflect::info::Typed;
///
/// let info = <HashMap<String, f64> as Typed>::type_info().as_map().unwrap();
/// assert!(info.key_info().is::<String>());
/// assert!(info.value_info().is::<f64>());
/// ```
#[derive(Clone)]
pub struct MapInfo {
    ty: Type,
    key: fn() -> &'static TypeInfo,
    value: fn() -> &'static TypeInfo,
    from_entries: FromEntries,
}

impl MapInfo {
    impl_type_fn!(ty);

    /// Creates a new [`MapInfo`].
    #[inline]
    pub fn new<TMap: TypePath, TKey: Typed, TValue: Typed>(from_entries: FromEntries) -> Self {
        Self {
            ty: Type::of::<TMap>(),
            key: TKey::type_info,
            value: TValue::type_info,
            from_entries,
        }
    }

    /// Returns the [`TypeInfo`] of keys.
    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key)()
    }

    /// Returns the [`TypeInfo`] of values.
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value)()
    }

    /// Builds a map from `entries`. Later duplicates win.
    #[inline]
    pub fn from_entries(
        &self,
        entries: Vec<(Box<dyn Reflect>, Box<dyn Reflect>)>,
    ) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.from_entries)(entries)
    }
}

// -----------------------------------------------------------------------------
// TupleInfo

/// A container for compile-time tuple info.
///
/// Used for std tuples and multi-field tuple structs.
///
/// ```
/// use jk_reflect::info::Typed;
///
/// let info = <(i32, String) as Typed>::type_info().as_tuple().unwrap();
/// assert_eq!(info.field_len(), 2);
/// assert!(info.field_at(1).unwrap().is::<String>());
/// ```
#[derive(Clone)]
pub struct TupleInfo {
    ty: Type,
    fields: Box<[fn() -> &'static TypeInfo]>,
    from_items: FromItems,
}

impl TupleInfo {
    impl_type_fn!(ty);

    /// Creates a new [`TupleInfo`] from the element infos, in order.
    #[inline]
    pub fn new<T: TypePath>(fields: &[fn() -> &'static TypeInfo], from_items: FromItems) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            from_items,
        }
    }

    /// Returns the [`TypeInfo`] of the element at `index`.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&'static TypeInfo> {
        self.fields.get(index).map(|f| f())
    }

    /// Returns an iterator over element infos.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static TypeInfo> + '_ {
        self.fields.iter().map(|f| f())
    }

    /// Returns the number of elements.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Builds a tuple from `items`, one per element.
    #[inline]
    pub fn from_items(&self, items: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError> {
        (self.from_items)(items)
    }
}

// -----------------------------------------------------------------------------
// Debug

macro_rules! impl_container_debug {
    ($($name:ident),*) => {$(
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.ty).finish()
            }
        }
    )*};
}

impl_container_debug!(ListInfo, SetInfo, MapInfo, TupleInfo);
