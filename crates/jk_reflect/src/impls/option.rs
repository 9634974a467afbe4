use crate::Reflect;
use crate::impls::{self, GenericTypeInfoCell, impl_generic_type_path};
use crate::info::{TypeInfo, Typed, UnionInfo, UnionMember};
use crate::ops::{ConstructError, ReflectRef, Union};
use crate::reflection::impl_reflect_basics;

impl_generic_type_path!("core::option", Option<T>);

fn option_from_member<T: Reflect + Typed>(
    index: usize,
    payload: Box<dyn Reflect>,
) -> Result<Box<dyn Reflect>, ConstructError> {
    match index {
        0 => Ok(Box::new(Some(impls::cast_part::<T>(payload)?))),
        1 => Ok(Box::new(None::<T>)),
        _ => Err(ConstructError::UnknownVariant { index }),
    }
}

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Union(UnionInfo::new::<Self>(
                &[UnionMember::new::<T>("Some"), UnionMember::none("None")],
                option_from_member::<T>,
            ))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    impl_reflect_basics!();

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Union(self)
    }
}

impl<T: Reflect + Typed> Union for Option<T> {
    #[inline]
    fn member_index(&self) -> usize {
        match self {
            Some(_) => 0,
            None => 1,
        }
    }

    #[inline]
    fn member(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(Reflect::as_reflect)
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{TypePath, Typed};

    #[test]
    fn option_is_a_union_with_none() {
        let info = <Option<u8>>::type_info().as_union().unwrap();
        assert_eq!(info.none_index(), Some(1));
        assert_eq!(<Option<u8>>::type_path(), "core::option::Option<u8>");

        let some = info.from_member(0, Box::new(3_u8)).unwrap();
        assert_eq!(some.take::<Option<u8>>().unwrap(), Some(3));
        assert!(info.from_member(0, Box::new("x")).is_err());
    }
}
