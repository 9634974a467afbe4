use std::collections::VecDeque;

use crate::Reflect;
use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell, impl_generic_type_path};
use crate::info::{ListInfo, TypeInfo, TypePath, Typed};
use crate::ops::{ConstructError, List, ReflectRef};
use crate::reflection::impl_reflect_basics;

macro_rules! impl_reflect_for_list {
    ($module:literal, $ident:ident, |$this:ident, $index:ident| $get:expr) => {
        impl_generic_type_path!($module, $ident<T>);

        impl<T: Reflect + Typed> Typed for $ident<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::List(ListInfo::new::<Self, T>(impls::collect_items::<Self, T>))
                })
            }
        }

        impl<T: Reflect + Typed> Reflect for $ident<T> {
            impl_reflect_basics!();

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::List(self)
            }
        }

        impl<T: Reflect + Typed> List for $ident<T> {
            #[inline]
            fn len(&self) -> usize {
                <$ident<T>>::len(self)
            }

            #[inline]
            fn get(&self, index: usize) -> Option<&dyn Reflect> {
                let ($this, $index) = (self, index);
                $get.map(Reflect::as_reflect)
            }
        }
    };
}

// `Vec` has no inherent `get`: it comes from the slice.
impl_reflect_for_list!("alloc::vec", Vec, |this, index| this.as_slice().get(index));
impl_reflect_for_list!("alloc::collections::vec_deque", VecDeque, |this, index| VecDeque::get(this, index));

// -----------------------------------------------------------------------------
// [T; N]

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["[", T::type_path(), "; ", &N.to_string(), "]"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["[", T::type_name(), "; ", &N.to_string(), "]"])
        })
    }

    #[inline]
    fn type_ident() -> &'static str {
        "array"
    }
}

fn array_from_items<T: Reflect + Typed, const N: usize>(
    items: Vec<Box<dyn Reflect>>,
) -> Result<Box<dyn Reflect>, ConstructError> {
    if items.len() != N {
        return Err(ConstructError::InvalidLength {
            expected: N,
            found: items.len(),
        });
    }
    let items = items
        .into_iter()
        .map(impls::cast_part::<T>)
        .collect::<Result<Vec<T>, _>>()?;
    match <[T; N]>::try_from(items) {
        Ok(array) => Ok(Box::new(array)),
        Err(items) => Err(ConstructError::InvalidLength {
            expected: N,
            found: items.len(),
        }),
    }
}

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::List(ListInfo::new::<Self, T>(array_from_items::<T, N>).with_fixed_len(N))
        })
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    impl_reflect_basics!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }
}

impl<T: Reflect + Typed, const N: usize> List for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(Reflect::as_reflect)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::{ConstructError, ReflectRef};

    #[test]
    fn list_paths() {
        assert_eq!(<Vec<String>>::type_path(), "alloc::vec::Vec<alloc::string::String>");
        assert_eq!(<VecDeque<u8>>::type_name(), "VecDeque<u8>");
        assert_eq!(<[u8; 4]>::type_path(), "[u8; 4]");
    }

    #[test]
    fn arrays_check_length() {
        let info = <[u8; 2]>::type_info().as_list().unwrap();
        let err = info.from_items(vec![Box::new(1_u8)]).unwrap_err();
        assert_eq!(err, ConstructError::InvalidLength { expected: 2, found: 1 });

        let ok = info.from_items(vec![Box::new(1_u8), Box::new(2_u8)]).unwrap();
        assert_eq!(ok.take::<[u8; 2]>().unwrap(), [1, 2]);
    }

    #[test]
    fn vec_and_deque_items() {
        let list = vec![1_u8, 2];
        let ReflectRef::List(view) = list.reflect_ref() else {
            panic!("not a list");
        };
        assert_eq!(view.len(), 2);
        assert_eq!(view.get(1).unwrap().downcast_ref::<u8>(), Some(&2));
        assert!(view.get(2).is_none());

        let deque = VecDeque::from([String::from("a")]);
        let ReflectRef::List(view) = deque.reflect_ref() else {
            panic!("not a list");
        };
        assert_eq!(view.get(0).unwrap().downcast_ref::<String>().unwrap(), "a");
        assert!(view.get(1).is_none());
    }

    #[test]
    fn boxed_items_are_viewed_through() {
        let list: Vec<Box<dyn Reflect>> = vec![Box::new(1_i32), Box::new("a")];
        let ReflectRef::List(view) = list.reflect_ref() else {
            panic!("not a list");
        };
        assert!(view.get(0).unwrap().is::<i32>());
        assert!(view.get(1).unwrap().is::<&'static str>());
    }
}
