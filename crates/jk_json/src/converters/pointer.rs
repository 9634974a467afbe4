//! Pointers (`Box<T>`, `Arc<T>`, `OnceLock<T>`) dump and load as their
//! pointee.

use jk_reflect::Reflect;
use jk_reflect::info::TypeInfo;
use jk_reflect::ops::ReflectRef;
use serde_json::Value;

use crate::context::{DumpContext, LoadContext};
use crate::converters::construct_failed;
use crate::error::Error;

pub fn dump_pointer(value: &dyn Reflect, _: &'static TypeInfo, ctx: &mut DumpContext<'_>) -> Result<Value, Error> {
    match value.reflect_ref() {
        ReflectRef::Pointer(Some(pointee)) => ctx.dump(pointee),
        ReflectRef::Pointer(None) => Ok(Value::Null),
        _ => Err(Error::custom("the value is not a pointer")),
    }
}

/// `null` loads as an empty pointer if the pointer can be empty.
pub fn load_pointer(json: &Value, cls: &'static TypeInfo, ctx: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    let Some(info) = cls.as_pointer() else {
        return Err(Error::custom("the pointer deserializer only handles pointers"));
    };

    let pointee = if json.is_null() && info.is_nullable() {
        None
    } else {
        Some(ctx.load(json, info.pointee_info())?)
    };
    info.wrap(pointee).map_err(|err| construct_failed(json, cls, err))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, OnceLock};

    use serde_json::json;

    #[test]
    fn pointees() {
        assert_eq!(crate::dump(&Box::new(5_u8)).unwrap(), json!(5));
        assert_eq!(*crate::load::<Arc<String>>(&json!("a")).unwrap(), "a");

        let empty = crate::load::<OnceLock<u8>>(&json!(null)).unwrap();
        assert!(empty.get().is_none());
        assert_eq!(crate::dump(&empty).unwrap(), json!(null));

        let full = crate::load::<OnceLock<u8>>(&json!(2)).unwrap();
        assert_eq!(full.get(), Some(&2));
    }
}
