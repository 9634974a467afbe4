use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

use crate::Reflect;
use crate::impls::{self, GenericTypeInfoCell, impl_generic_type_path};
use crate::info::{SetInfo, TypeInfo, Typed};
use crate::ops::{ReflectRef, Set};
use crate::reflection::impl_reflect_basics;

macro_rules! impl_reflect_for_set {
    ($module:literal, $ident:ident, $($bound:tt)+) => {
        impl_generic_type_path!($module, $ident<T>);

        impl<T: Reflect + Typed + $($bound)+> Typed for $ident<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Set(SetInfo::new::<Self, T>(impls::collect_items::<Self, T>))
                })
            }
        }

        impl<T: Reflect + Typed + $($bound)+> Reflect for $ident<T> {
            impl_reflect_basics!();

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Set(self)
            }
        }

        impl<T: Reflect + Typed + $($bound)+> Set for $ident<T> {
            #[inline]
            fn len(&self) -> usize {
                <$ident<T>>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                Box::new(<$ident<T>>::iter(self).map(Reflect::as_reflect))
            }
        }
    };
}

impl_reflect_for_set!("std::collections", HashSet, Eq + Hash);
impl_reflect_for_set!("alloc::collections", BTreeSet, Ord);

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};

    use crate::Reflect;
    use crate::info::{TypePath, Typed};

    #[test]
    fn sets_collapse_duplicates() {
        let info = <HashSet<u8>>::type_info().as_set().unwrap();
        let set = info
            .from_items(vec![Box::new(1_u8), Box::new(1_u8), Box::new(2_u8)])
            .unwrap();
        assert_eq!(set.take::<HashSet<u8>>().unwrap().len(), 2);
    }

    #[test]
    fn set_paths() {
        assert_eq!(<BTreeSet<u8>>::type_path(), "alloc::collections::BTreeSet<u8>");
        assert_eq!(<HashSet<u8>>::type_ident(), "HashSet");
        let _ = BTreeSet::<u8>::new().reflect_kind();
    }
}
