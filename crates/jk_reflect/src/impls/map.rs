use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::Reflect;
use crate::impls::{self, GenericTypeInfoCell, impl_generic_type_path};
use crate::info::{MapInfo, TypeInfo, Typed};
use crate::ops::{Map, ReflectRef};
use crate::reflection::impl_reflect_basics;

macro_rules! impl_reflect_for_map {
    ($module:literal, $ident:ident, $($bound:tt)+) => {
        impl_generic_type_path!($module, $ident<K, V>);

        impl<K: Reflect + Typed + $($bound)+, V: Reflect + Typed> Typed for $ident<K, V> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Map(MapInfo::new::<Self, K, V>(
                        impls::collect_entries::<Self, K, V>,
                    ))
                })
            }
        }

        impl<K: Reflect + Typed + $($bound)+, V: Reflect + Typed> Reflect for $ident<K, V> {
            impl_reflect_basics!();

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Map(self)
            }
        }

        impl<K: Reflect + Typed + $($bound)+, V: Reflect + Typed> Map for $ident<K, V> {
            #[inline]
            fn len(&self) -> usize {
                <$ident<K, V>>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                Box::new(
                    <$ident<K, V>>::iter(self).map(|(k, v)| (k.as_reflect(), v.as_reflect())),
                )
            }
        }
    };
}

impl_reflect_for_map!("std::collections", HashMap, Eq + Hash);
impl_reflect_for_map!("alloc::collections", BTreeMap, Ord);

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::ExtraFields;

    #[test]
    fn later_entries_win() {
        let info = <BTreeMap<String, u8>>::type_info().as_map().unwrap();
        let map = info
            .from_entries(vec![
                (String::from("a").into_boxed_reflect(), 1_u8.into_boxed_reflect()),
                (String::from("a").into_boxed_reflect(), 2_u8.into_boxed_reflect()),
            ])
            .unwrap();
        let map = map.take::<BTreeMap<String, u8>>().unwrap();
        assert_eq!(map["a"], 2);
    }

    #[test]
    fn extras_are_a_map_of_dynamic_values() {
        let info = ExtraFields::type_info().as_map().unwrap();
        assert!(info.value_info().is_dynamic());
        assert_eq!(
            <BTreeMap<String, u8>>::type_name(),
            "BTreeMap<String, u8>"
        );
    }
}
