use crate::Reflect;

/// A trait for enums with unit variants.
///
/// The index refers to [`EnumInfo::variant_at`](crate::info::EnumInfo::variant_at).
pub trait Enum: Reflect {
    /// Returns the index of the current variant.
    fn variant_index(&self) -> usize;
}

/// A trait for unions: exactly one member is active.
///
/// ```
/// use jk_reflect::ops::Union;
///
/// let value = Some(3_u8);
/// let union: &dyn Union = &value;
/// assert_eq!(union.member_index(), 0);
/// assert_eq!(union.member().unwrap().downcast_ref::<u8>(), Some(&3));
/// ```
pub trait Union: Reflect {
    /// Returns the index of the active member, see
    /// [`UnionInfo::member_at`](crate::info::UnionInfo::member_at).
    fn member_index(&self) -> usize;

    /// Returns the payload of the active member, `None` for the none member.
    fn member(&self) -> Option<&dyn Reflect>;
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::derive::Reflect;
    use crate::info::{EnumValue, Typed};
    use crate::ops::{Enum, ReflectRef, Union};

    #[derive(Reflect, Debug, PartialEq)]
    enum Level {
        Low = -1,
        Mid,
        #[reflect(value = "hi")]
        High,
    }

    #[derive(Reflect, Debug, PartialEq)]
    enum Value {
        Int(i64),
        Text(String),
        Nothing,
    }

    #[test]
    fn enum_values_follow_discriminants() {
        let info = Level::type_info().as_enum().unwrap();
        assert_eq!(info.variant_at(0).unwrap().value(), EnumValue::Int(-1));
        assert_eq!(info.variant_at(1).unwrap().value(), EnumValue::Int(0));
        assert_eq!(info.variant_at(2).unwrap().value(), EnumValue::Str("hi"));

        assert_eq!(Level::Mid.variant_index(), 1);
        let high = info.from_index(2).unwrap();
        assert_eq!(high.take::<Level>().unwrap(), Level::High);
        assert!(info.from_index(3).is_none());
    }

    #[test]
    fn union_members() {
        let info = Value::type_info().as_union().unwrap();
        assert_eq!(info.member_len(), 3);
        assert_eq!(info.none_index(), Some(2));
        assert!(info.member_at(1).unwrap().type_info().is::<String>());

        let text = info.from_member(1, Box::new(String::from("a"))).unwrap();
        assert_eq!(text.take::<Value>().unwrap(), Value::Text("a".into()));
        assert!(info.from_member(0, Box::new("no")).is_err());

        let value = Value::Int(4);
        assert_eq!(value.member_index(), 0);
        let ReflectRef::Union(union) = value.reflect_ref() else {
            panic!("not a union");
        };
        assert_eq!(union.member().unwrap().downcast_ref::<i64>(), Some(&4));
        assert!(Value::Nothing.member().is_none());
    }
}
