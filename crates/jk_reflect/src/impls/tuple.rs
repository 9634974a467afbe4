use crate::Reflect;
use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{TupleInfo, TypeInfo, TypePath, Typed};
use crate::ops::{ConstructError, ReflectRef, Tuple};
use crate::reflection::impl_reflect_basics;

fn tuple_text(parts: &[&str]) -> String {
    if parts.len() == 1 {
        impls::concat(&["(", parts[0], ",)"])
    } else {
        impls::concat(&["(", &parts.join(", "), ")"])
    }
}

macro_rules! impl_reflect_for_tuple {
    ($len:literal: $($index:tt $param:ident),+) => {
        impl<$($param: TypePath),+> TypePath for ($($param,)+) {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| tuple_text(&[$($param::type_path()),+]))
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| tuple_text(&[$($param::type_name()),+]))
            }

            #[inline]
            fn type_ident() -> &'static str {
                "tuple"
            }
        }

        impl<$($param: Reflect + Typed),+> Typed for ($($param,)+) {
            fn type_info() -> &'static TypeInfo {
                fn from_items<$($param: Reflect + Typed),+>(
                    items: Vec<Box<dyn Reflect>>,
                ) -> Result<Box<dyn Reflect>, ConstructError> {
                    if items.len() != $len {
                        return Err(ConstructError::InvalidLength {
                            expected: $len,
                            found: items.len(),
                        });
                    }
                    let mut items = items.into_iter();
                    let tuple = ($(
                        match items.next() {
                            Some(item) => impls::cast_part::<$param>(item)?,
                            None => return Err(ConstructError::InvalidLength {
                                expected: $len,
                                found: $index,
                            }),
                        },
                    )+);
                    Ok(Box::new(tuple))
                }

                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Tuple(TupleInfo::new::<Self>(
                        &[$($param::type_info),+],
                        from_items::<$($param),+>,
                    ))
                })
            }
        }

        impl<$($param: Reflect + Typed),+> Reflect for ($($param,)+) {
            impl_reflect_basics!();

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Tuple(self)
            }
        }

        impl<$($param: Reflect + Typed),+> Tuple for ($($param,)+) {
            #[inline]
            fn len(&self) -> usize {
                $len
            }

            fn get(&self, index: usize) -> Option<&dyn Reflect> {
                match index {
                    $($index => Some(self.$index.as_reflect()),)+
                    _ => None,
                }
            }
        }
    };
}

impl_reflect_for_tuple!(1: 0 P0);
impl_reflect_for_tuple!(2: 0 P0, 1 P1);
impl_reflect_for_tuple!(3: 0 P0, 1 P1, 2 P2);
impl_reflect_for_tuple!(4: 0 P0, 1 P1, 2 P2, 3 P3);
impl_reflect_for_tuple!(5: 0 P0, 1 P1, 2 P2, 3 P3, 4 P4);
impl_reflect_for_tuple!(6: 0 P0, 1 P1, 2 P2, 3 P3, 4 P4, 5 P5);

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::ReflectRef;

    #[test]
    fn tuple_paths() {
        assert_eq!(<(u8,)>::type_path(), "(u8,)");
        assert_eq!(<(u8, String)>::type_name(), "(u8, String)");
        assert_eq!(<(u8, String)>::type_ident(), "tuple");
    }

    #[test]
    fn build_and_view() {
        let info = <(u8, String)>::type_info().as_tuple().unwrap();
        let value = info
            .from_items(vec![1_u8.into_boxed_reflect(), String::from("a").into_boxed_reflect()])
            .unwrap();
        let ReflectRef::Tuple(view) = value.reflect_ref() else {
            panic!("not a tuple");
        };
        assert_eq!(view.len(), 2);
        assert_eq!(view.get(1).unwrap().downcast_ref::<String>().unwrap(), "a");
        assert!(info.from_items(vec![1_u8.into_boxed_reflect()]).is_err());
    }
}
