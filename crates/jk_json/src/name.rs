//! Human-readable type names.
//!
//! The same resolver produces registry keys (fully qualified, lowercased),
//! the names in error messages (short) and the names users pass to
//! [`TypeDescriptor::named`](crate::TypeDescriptor::named).
//!
//! Results are memoized per `(type, qualification, transformer)` until the
//! outermost public call returns.

use std::any::TypeId;
use std::sync::{PoisonError, RwLock};

use jk_reflect::info::TypeInfo;
use jk_utils::hash::{FixedHashState, HashMap};

/// A function applied to a resolved name, last.
pub type NameTransformer = fn(&str) -> String;

type MemoKey = (TypeId, bool, usize);

static MEMO: RwLock<HashMap<MemoKey, String>> = RwLock::new(HashMap::with_hasher(FixedHashState));

/// Returns the name of a type.
///
/// - `()` is `"None"`, `&'static str` is `"str"` and `Box<dyn Reflect>` is
///   `"Any"`.
/// - Otherwise the bare identifier, without generics.
/// - `fully_qualified` prefixes the module path when the type has one.
/// - `transformer` is applied to the final text.
///
/// ```
/// use jk_json::name::resolve_name;
/// use jk_reflect::info::Typed;
///
/// let info = <Vec<String>>::type_info();
/// assert_eq!(resolve_name(info, false, None), "Vec");
/// assert_eq!(resolve_name(info, true, None), "alloc::vec::Vec");
/// assert_eq!(resolve_name(<()>::type_info(), true, None), "None");
/// assert_eq!(resolve_name(i32::type_info(), true, None), "i32");
/// ```
pub fn resolve_name(info: &TypeInfo, fully_qualified: bool, transformer: Option<NameTransformer>) -> String {
    let key: MemoKey = (
        info.type_id(),
        fully_qualified,
        transformer.map_or(0, |f| f as usize),
    );

    if let Some(name) = MEMO.read().unwrap_or_else(PoisonError::into_inner).get(&key) {
        return name.clone();
    }

    let name = compute(info, fully_qualified);
    let name = match transformer {
        Some(transformer) => transformer(&name),
        None => name,
    };

    MEMO.write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key, name.clone());
    name
}

/// The short name, used in error messages.
#[inline]
pub fn short_name(info: &TypeInfo) -> String {
    resolve_name(info, false, None)
}

/// The key under which converters for `info` are registered.
#[inline]
pub(crate) fn registry_key(info: &TypeInfo) -> String {
    resolve_name(info, true, Some(lowercase))
}

fn lowercase(name: &str) -> String {
    name.to_lowercase()
}

fn compute(info: &TypeInfo, fully_qualified: bool) -> String {
    if info.is::<()>() {
        return String::from("None");
    }
    if info.is::<&'static str>() {
        return String::from("str");
    }
    if info.is_dynamic() {
        return String::from("Any");
    }

    let ident = match info.type_ident() {
        "" => {
            let path = info.type_path();
            let path = path.split_once('<').map_or(path, |(head, _)| head);
            path.rsplit("::").next().unwrap_or(path)
        }
        ident => ident,
    };

    match info.module_path() {
        Some(module) if fully_qualified => format!("{module}::{ident}"),
        _ => String::from(ident),
    }
}

/// Forgets every memoized name.
pub(crate) fn clear_memo() {
    MEMO.write().unwrap_or_else(PoisonError::into_inner).clear();
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use jk_reflect::Reflect;
    use jk_reflect::derive::Reflect;
    use jk_reflect::info::Typed;

    use super::{registry_key, resolve_name, short_name};

    #[derive(Reflect)]
    struct Car {
        color: String,
    }

    fn shout(name: &str) -> String {
        name.to_uppercase()
    }

    #[test]
    fn special_names() {
        assert_eq!(short_name(<()>::type_info()), "None");
        assert_eq!(short_name(<&'static str>::type_info()), "str");
        assert_eq!(short_name(<Box<dyn Reflect>>::type_info()), "Any");
    }

    #[test]
    fn qualified_and_transformed() {
        let info = Car::type_info();
        assert_eq!(short_name(info), "Car");
        assert_eq!(
            resolve_name(info, true, None),
            format!("{}::Car", module_path!())
        );
        assert_eq!(resolve_name(info, false, Some(shout)), "CAR");

        let map = <BTreeMap<String, u8>>::type_info();
        assert_eq!(registry_key(map), "alloc::collections::btreemap");
        assert_eq!(short_name(<(u8, u8)>::type_info()), "tuple");
    }
}
