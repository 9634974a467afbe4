//! Utilities for implementing reflection traits, and the std impls.
//!
//! - [`concat`]: string concatenation for type paths.
//! - [`NonGenericTypeInfoCell`]: storage of [`TypeInfo`] for non-generic types.
//! - [`GenericTypeInfoCell`], [`GenericTypePathCell`]: the same for generic types.
//! - [`collect_items`], [`collect_entries`]: constructors shared by containers.
//!
//! ## Implemented Menu
//!
//! - opaque: `bool`, `char`, `i8`-`i64`, `u8`-`u64`, `isize`, `usize`, `f32`,
//!   `f64`, `()`, `String`, `&'static str`, `PathBuf`, `Duration`,
//!   `serde_json::Value`
//! - chrono ("chrono" feature): `DateTime<Utc>`, `DateTime<FixedOffset>`,
//!   `NaiveDate`, `NaiveTime`, `TimeDelta`
//! - list: `Vec<T>`, `VecDeque<T>`, `[T; N]`
//! - set: `HashSet<T>`, `BTreeSet<T>`
//! - map: `HashMap<K, V>`, `BTreeMap<K, V>`
//! - tuple: `(P0,)` to `(P0, .., P5)`
//! - union: `Option<T>`
//! - pointer: `Box<T>`, `Arc<T>`, `OnceLock<T>`
//!
//! [`TypeInfo`]: crate::info::TypeInfo

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod list;
mod map;
mod opaque;
mod option;
mod pointer;
mod set;
mod tuple;

#[cfg(feature = "chrono")]
mod time;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

use crate::Reflect;
use crate::info::TypePath;
use crate::ops::ConstructError;

/// An efficient string concatenation function.
///
/// This is usually used for the implementation of `TypePath`.
///
/// ```
/// use jk_reflect::impls;
///
/// let s = impls::concat(&["module", "::", "name", "<", "T", ">"]);
/// assert_eq!(s, "module::name<T>");
/// assert_eq!(s.capacity(), 15);
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}

/// Casts a loaded part to `T`, or reports the mismatch.
#[inline]
pub fn cast_part<T: Reflect + TypePath>(value: Box<dyn Reflect>) -> Result<T, ConstructError> {
    T::from_boxed(value)
        .map_err(|value| ConstructError::mismatched(T::type_path(), value.reflect_type_path()))
}

/// Builds a collection `C` from loaded items of type `T`.
///
/// ```
/// use jk_reflect::impls::collect_items;
///
/// let items: Vec<Box<dyn jk_reflect::Reflect>> = vec![Box::new(1_u8), Box::new(2_u8)];
/// let list = collect_items::<Vec<u8>, u8>(items).unwrap();
/// assert_eq!(list.take::<Vec<u8>>().unwrap(), [1, 2]);
/// ```
pub fn collect_items<C, T>(items: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, ConstructError>
where
    C: FromIterator<T> + Reflect,
    T: Reflect + TypePath,
{
    let collection: C = items.into_iter().map(cast_part::<T>).collect::<Result<_, _>>()?;
    Ok(Box::new(collection))
}

/// Builds a mapping `M` from loaded entries of types `K` and `V`.
pub fn collect_entries<M, K, V>(
    entries: Vec<(Box<dyn Reflect>, Box<dyn Reflect>)>,
) -> Result<Box<dyn Reflect>, ConstructError>
where
    M: FromIterator<(K, V)> + Reflect,
    K: Reflect + TypePath,
    V: Reflect + TypePath,
{
    let map: M = entries
        .into_iter()
        .map(|(key, value)| Ok((cast_part::<K>(key)?, cast_part::<V>(value)?)))
        .collect::<Result<_, ConstructError>>()?;
    Ok(Box::new(map))
}

// -----------------------------------------------------------------------------
// TypePath helpers

/// Implements [`TypePath`] for a std type with type parameters.
///
/// `impl_generic_type_path!("alloc::vec", Vec<T>)` gives
/// `alloc::vec::Vec<u8>`, `Vec<u8>` and `Vec` for `Vec<u8>`.
macro_rules! impl_generic_type_path {
    ($module:literal, $ident:ident < $($param:ident),+ >) => {
        impl<$($param: $crate::info::TypePath),+> $crate::info::TypePath for $ident<$($param),+> {
            fn type_path() -> &'static str {
                static CELL: $crate::impls::GenericTypePathCell = $crate::impls::GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    $crate::impls::concat(&[
                        $module, "::", stringify!($ident), "<",
                        [$(<$param as $crate::info::TypePath>::type_path()),+].join(", ").as_str(),
                        ">",
                    ])
                })
            }

            fn type_name() -> &'static str {
                static CELL: $crate::impls::GenericTypePathCell = $crate::impls::GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    $crate::impls::concat(&[
                        stringify!($ident), "<",
                        [$(<$param as $crate::info::TypePath>::type_name()),+].join(", ").as_str(),
                        ">",
                    ])
                })
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($ident)
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }
    };
}

pub(crate) use impl_generic_type_path;
