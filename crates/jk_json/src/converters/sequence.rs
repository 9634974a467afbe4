//! Lists, sets and tuples: JSON arrays.
//!
//! Items are dumped and loaded one by one through the context, or split
//! over worker threads when the options ask for more than one task.

use jk_reflect::Reflect;
use jk_reflect::info::TypeInfo;
use jk_reflect::ops::ReflectRef;
use serde_json::Value;

use crate::context::{DumpContext, LoadContext};
use crate::converters::{construct_failed, invalid_shape};
use crate::error::{DeserializationError, DeserializationErrorKind, Error};
use crate::name::short_name;
use crate::parallel;

/// Dumps a list, a set or a tuple as an array.
///
/// Sets are dumped in their iteration order.
pub fn dump_sequence(value: &dyn Reflect, _: &'static TypeInfo, ctx: &mut DumpContext<'_>) -> Result<Value, Error> {
    let items: Vec<&dyn Reflect> = match value.reflect_ref() {
        ReflectRef::List(list) => (0..list.len()).filter_map(|i| list.get(i)).collect(),
        ReflectRef::Tuple(tuple) => (0..tuple.len()).filter_map(|i| tuple.get(i)).collect(),
        ReflectRef::Set(set) => set.iter().collect(),
        _ => return Err(Error::custom("the value is not a list, a set or a tuple")),
    };

    let dumped = ctx.with_store_cls(false, |ctx| parallel::dump_items(&items, ctx))?;
    Ok(Value::Array(dumped))
}

/// Loads an array into a list, a set or a tuple.
///
/// Arrays (fixed-length lists) and tuples require exactly as many elements
/// as they hold.
pub fn load_sequence(json: &Value, cls: &'static TypeInfo, ctx: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    let Value::Array(items) = json else {
        return Err(invalid_shape(json, cls, "an array"));
    };

    let built = if let Some(info) = cls.as_list() {
        if let Some(expected) = info.fixed_len()
            && expected != items.len()
        {
            return Err(length_mismatch(json, cls, expected, items.len()));
        }
        let item_info = info.item_info();
        let loaded = parallel::load_items(items, &|_| item_info, ctx)?;
        info.from_items(loaded)
    } else if let Some(info) = cls.as_set() {
        let item_info = info.item_info();
        let loaded = parallel::load_items(items, &|_| item_info, ctx)?;
        info.from_items(loaded)
    } else if let Some(info) = cls.as_tuple() {
        if info.field_len() != items.len() {
            return Err(length_mismatch(json, cls, info.field_len(), items.len()));
        }
        let fields: Vec<&'static TypeInfo> = info.iter().collect();
        let loaded = parallel::load_items(items, &|index| fields[index], ctx)?;
        info.from_items(loaded)
    } else {
        return Err(Error::custom("the sequence deserializer only handles lists, sets and tuples"));
    };

    built.map_err(|err| construct_failed(json, cls, err))
}

fn length_mismatch(json: &Value, cls: &TypeInfo, expected: usize, found: usize) -> Error {
    DeserializationError::new(
        DeserializationErrorKind::LengthMismatch,
        format!(
            "Not enough or too many elements for \"{}\": expected {expected}, found {found}.",
            short_name(cls)
        ),
        json,
        Some(cls),
    )
    .into()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use serde_json::json;

    use crate::{DeserializationErrorKind, load};

    #[test]
    fn lists_and_sets() {
        assert_eq!(crate::dump(&vec![1_u8, 2]).unwrap(), json!([1, 2]));
        assert_eq!(load::<VecDeque<u8>>(&json!([3, 4])).unwrap(), VecDeque::from([3, 4]));

        let set = BTreeSet::from([String::from("a"), String::from("b")]);
        assert_eq!(crate::dump(&set).unwrap(), json!(["a", "b"]));
        assert_eq!(load::<BTreeSet<String>>(&json!(["b", "a", "a"])).unwrap(), set);
    }

    #[test]
    fn tuples() {
        assert_eq!(crate::dump(&(1_u8, String::from("x"))).unwrap(), json!([1, "x"]));
        assert_eq!(load::<(u8, String)>(&json!([1, "x"])).unwrap(), (1, String::from("x")));

        let err = load::<(u8, String)>(&json!([1])).unwrap_err();
        let err = err.as_deserialization().unwrap();
        assert_eq!(err.kind(), DeserializationErrorKind::LengthMismatch);
        assert!(err.message().ends_with("expected 2, found 1."));
    }

    #[test]
    fn fixed_arrays() {
        assert_eq!(load::<[u8; 3]>(&json!([1, 2, 3])).unwrap(), [1, 2, 3]);
        let err = load::<[u8; 3]>(&json!([1, 2])).unwrap_err();
        assert_eq!(err.as_deserialization().unwrap().kind(), DeserializationErrorKind::LengthMismatch);
    }

    #[test]
    fn items_must_fit() {
        let err = load::<Vec<u8>>(&json!([1, "x"])).unwrap_err();
        assert_eq!(err.as_deserialization().unwrap().kind(), DeserializationErrorKind::InvalidShape);
    }
}
