//! Unions: `Option<T>` and enums with payloads.

use jk_reflect::Reflect;
use jk_reflect::info::TypeInfo;
use jk_reflect::ops::ReflectRef;
use serde_json::Value;

use crate::context::{DumpContext, LoadContext};
use crate::converters::{construct_failed, describe};
use crate::error::{DeserializationError, DeserializationErrorKind, Error};
use crate::name::short_name;

/// Dumps the payload of the active member, `null` for the none member.
pub fn dump_union(value: &dyn Reflect, _: &'static TypeInfo, ctx: &mut DumpContext<'_>) -> Result<Value, Error> {
    let ReflectRef::Union(union) = value.reflect_ref() else {
        return Err(Error::custom("the value is not a union"));
    };
    match union.member() {
        Some(member) => ctx.dump(member),
        None => Ok(Value::Null),
    }
}

/// Loads `null` into the none member, anything else into the first member
/// that accepts it, trying members in declaration order.
pub fn load_union(json: &Value, cls: &'static TypeInfo, ctx: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    let Some(info) = cls.as_union() else {
        return Err(Error::custom("the union deserializer only handles unions"));
    };

    if json.is_null()
        && let Some(index) = info.none_index()
    {
        return info
            .from_member(index, Box::new(()))
            .map_err(|err| construct_failed(json, cls, err));
    }

    let mut last_error = None;
    for (index, member) in info.members().iter().enumerate() {
        if member.is_none() {
            continue;
        }
        match ctx.load(json, member.type_info()) {
            Ok(payload) => {
                return info
                    .from_member(index, payload)
                    .map_err(|err| construct_failed(json, cls, err));
            }
            Err(err) => {
                log::trace!("`{}` does not accept the value: {err}", member.name());
                last_error = Some(err);
            }
        }
    }

    let names: Vec<String> = info
        .members()
        .iter()
        .map(|member| {
            if member.is_none() {
                String::from("None")
            } else {
                short_name(member.type_info())
            }
        })
        .collect();
    let mut err = DeserializationError::new(
        DeserializationErrorKind::NoMatchInUnion,
        format!(
            "Could not match the object of type \"{}\" to any type of the Union: {}",
            describe(json),
            names.join(", ")
        ),
        json,
        Some(cls),
    );
    if let Some(cause) = last_error {
        err = err.with_cause(cause);
    }
    Err(err.into())
}

#[cfg(test)]
mod tests {
    use jk_reflect::derive::Reflect;
    use serde_json::json;

    use crate::error::DeserializationErrorKind;

    #[derive(Reflect, Debug, PartialEq)]
    enum Shape {
        Count(u32),
        Label(String),
        Empty,
    }

    #[test]
    fn members_in_order() {
        assert_eq!(crate::load::<Shape>(&json!(3)).unwrap(), Shape::Count(3));
        assert_eq!(crate::load::<Shape>(&json!("three")).unwrap(), Shape::Label("three".into()));
        assert_eq!(crate::load::<Shape>(&json!(null)).unwrap(), Shape::Empty);
        assert_eq!(crate::dump(&Shape::Label("x".into())).unwrap(), json!("x"));
        assert_eq!(crate::dump(&Shape::Empty).unwrap(), json!(null));
    }

    #[test]
    fn no_member_matches() {
        let err = crate::load::<Shape>(&json!([1])).unwrap_err();
        let err = err.as_deserialization().unwrap();
        assert_eq!(err.kind(), DeserializationErrorKind::NoMatchInUnion);
        assert_eq!(
            err.to_string(),
            "Could not match the object of type \"an array\" to any type of the Union: u32, String, None"
        );
    }

    #[test]
    fn options() {
        assert_eq!(crate::load::<Option<u8>>(&json!(null)).unwrap(), None);
        assert_eq!(crate::load::<Option<u8>>(&json!(7)).unwrap(), Some(7));
        assert_eq!(crate::dump(&Some(1.5_f64)).unwrap(), json!(1.5));
    }
}
