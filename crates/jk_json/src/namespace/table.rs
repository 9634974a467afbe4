use jk_reflect::info::TypeInfo;
use jk_utils::hash::HashMap;

use crate::descriptor::TypeDescriptor;
use crate::name;

/// A converter found for a type.
///
/// `target` is the info the converter must be called with. It differs from
/// the queried type when the converter was found for the underlying type of
/// a newtype.
#[derive(Clone, Copy)]
pub(crate) struct Resolved<F> {
    pub func: F,
    pub target: &'static TypeInfo,
}

impl<F> Resolved<F> {
    /// Returns `true` if the converter belongs to the newtype's inner type.
    #[inline]
    pub fn via_newtype(&self, queried: &TypeInfo) -> bool {
        self.target.type_id() != queried.type_id()
    }
}

/// Converters by registry key, plus the ordered fallback list.
///
/// Lookup tries the exact key first, then the first fallback descriptor the
/// type matches (subtype or family), then the same two steps for the
/// underlying type of a newtype.
#[derive(Clone)]
pub(crate) struct ConverterTable<F> {
    by_key: HashMap<String, F>,
    fallbacks: Vec<(TypeDescriptor, String)>,
}

impl<F: Copy> ConverterTable<F> {
    pub fn new() -> Self {
        Self {
            by_key: HashMap::default(),
            fallbacks: Vec::new(),
        }
    }

    /// Stores `func` for every descriptor.
    ///
    /// High-priority descriptors are tried first during fallback, the others
    /// last. Registering a descriptor again moves it.
    pub fn register(&mut self, func: F, types: impl IntoIterator<Item = TypeDescriptor>, high_priority: bool) {
        for descriptor in types {
            let key = descriptor.registry_key();
            self.by_key.insert(key.clone(), func);

            self.fallbacks.retain(|(existing, _)| *existing != descriptor);
            if high_priority {
                self.fallbacks.insert(0, (descriptor, key));
            } else {
                self.fallbacks.push((descriptor, key));
            }
        }
    }

    pub fn lookup(&self, info: &'static TypeInfo) -> Option<Resolved<F>> {
        if let Some(func) = self.find(info) {
            return Some(Resolved { func, target: info });
        }
        let inner = info.as_newtype()?.inner_info();
        self.find(inner).map(|func| Resolved { func, target: inner })
    }

    fn find(&self, info: &'static TypeInfo) -> Option<F> {
        if let Some(func) = self.by_key.get(&name::registry_key(info)) {
            return Some(*func);
        }
        self.fallbacks
            .iter()
            .find(|(descriptor, _)| descriptor.matches(info))
            .and_then(|(_, key)| self.by_key.get(key).copied())
    }
}

#[cfg(test)]
mod tests {
    use jk_reflect::derive::Reflect;
    use jk_reflect::info::{ReflectKind, Typed};

    use super::ConverterTable;
    use crate::descriptor::TypeDescriptor;

    #[derive(Reflect)]
    struct Meters(f64);

    #[derive(Reflect)]
    struct Point {
        x: i32,
    }

    #[test]
    fn exact_then_family() {
        let mut table = ConverterTable::new();
        table.register(1, [TypeDescriptor::Kind(ReflectKind::List)], false);
        table.register(2, [TypeDescriptor::of::<Vec<u8>>()], true);

        assert_eq!(table.lookup(<Vec<u8>>::type_info()).unwrap().func, 2);
        // Same key: generics are not part of it.
        assert_eq!(table.lookup(<Vec<String>>::type_info()).unwrap().func, 2);
        assert_eq!(table.lookup(<[u8; 2]>::type_info()).unwrap().func, 1);
        assert!(table.lookup(Point::type_info()).is_none());
    }

    #[test]
    fn priority_orders_fallbacks() {
        let mut table = ConverterTable::new();
        table.register(1, [TypeDescriptor::Any], false);
        table.register(2, [TypeDescriptor::Kind(ReflectKind::Struct)], false);
        assert_eq!(table.lookup(Point::type_info()).unwrap().func, 1);

        table.register(2, [TypeDescriptor::Kind(ReflectKind::Struct)], true);
        assert_eq!(table.lookup(Point::type_info()).unwrap().func, 2);
    }

    #[test]
    fn newtypes_fall_back_to_their_inner_type() {
        let mut table = ConverterTable::new();
        table.register(7, [TypeDescriptor::of::<f64>()], true);

        let found = table.lookup(Meters::type_info()).unwrap();
        assert_eq!(found.func, 7);
        assert!(found.target.is::<f64>());
        assert!(found.via_newtype(Meters::type_info()));
    }
}
