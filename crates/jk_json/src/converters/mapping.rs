//! Maps: JSON objects.
//!
//! JSON keys are strings. String-like keys are used as they are; other keys
//! are dumped and, if they dump to a string, a number or a bool, that text
//! is the key. Keys dumping to anything else are replaced by a hash, and
//! the object gets a [`KEYS_KEY`] section mapping each hash to the dumped
//! key.

use jk_reflect::Reflect;
use jk_reflect::info::TypeInfo;
use jk_reflect::ops::ReflectRef;
use jk_utils::hash::stable_hash;
use serde_json::{Map, Value};

use crate::context::{DumpContext, LoadContext};
use crate::converters::object::class_of;
use crate::converters::{construct_failed, invalid_shape};
use crate::error::{DeserializationError, DeserializationErrorKind, Error};
use crate::verbosity::{CLASS_KEY, META_KEY};

/// The section holding keys that are not valid JSON keys.
pub const KEYS_KEY: &str = "-keys";

enum DumpedKey {
    Text(String),
    Hashed(String, Value),
}

/// Dumps a map as an object.
pub fn dump_mapping(value: &dyn Reflect, _: &'static TypeInfo, ctx: &mut DumpContext<'_>) -> Result<Value, Error> {
    let ReflectRef::Map(map) = value.reflect_ref() else {
        return Err(Error::custom("the value is not a map"));
    };
    let options = ctx.options();
    let store_cls = ctx.store_cls();

    let mut object = Map::with_capacity(map.len());
    let mut relocated = Map::new();

    for (key, item) in map.iter() {
        let key = match dump_key(key, ctx)? {
            DumpedKey::Text(text) => match options.key_transformer() {
                Some(transformer) => transformer(&text),
                None => text,
            },
            DumpedKey::Hashed(hash, dumped) => {
                relocated.insert(hash.clone(), dumped);
                hash
            }
        };

        let mut dumped = ctx.dump(item)?;
        if options.strip_nulls() && dumped.is_null() {
            continue;
        }
        if store_cls && let Value::Object(child) = &mut dumped {
            let class = ctx.namespace().class_name(class_of(item));
            child.insert(String::from(CLASS_KEY), Value::String(class));
        }
        object.insert(key, dumped);
    }

    if !relocated.is_empty() {
        object.insert(String::from(KEYS_KEY), Value::Object(relocated));
    }
    Ok(Value::Object(object))
}

fn dump_key(key: &dyn Reflect, ctx: &mut DumpContext<'_>) -> Result<DumpedKey, Error> {
    if let Some(key) = key.downcast_ref::<String>() {
        return Ok(DumpedKey::Text(key.clone()));
    }
    if let Some(key) = key.downcast_ref::<&'static str>() {
        return Ok(DumpedKey::Text(String::from(*key)));
    }
    if let Some(key) = key.downcast_ref::<char>() {
        return Ok(DumpedKey::Text(key.to_string()));
    }

    let dumped = ctx.with_store_cls(false, |ctx| ctx.dump(key))?;
    Ok(match dumped {
        Value::String(text) => DumpedKey::Text(text),
        Value::Number(number) => DumpedKey::Text(number.to_string()),
        Value::Bool(flag) => DumpedKey::Text(flag.to_string()),
        other => DumpedKey::Hashed(stable_hash(&other.to_string()).to_string(), other),
    })
}

/// Loads an object into a map.
///
/// Keys of non-string types are parsed back from their text. Hashed keys
/// are loaded from the [`KEYS_KEY`] section, which requires a key type
/// other than `String`.
pub fn load_mapping(json: &Value, cls: &'static TypeInfo, ctx: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    let Some(info) = cls.as_map() else {
        return Err(Error::custom("the map deserializer only handles maps"));
    };
    let Value::Object(input) = json else {
        return Err(invalid_shape(json, cls, "an object"));
    };
    let key_info = info.key_info();

    let relocated = match input.get(KEYS_KEY) {
        None => None,
        Some(_) if key_info.is::<String>() || key_info.is_dynamic() => {
            return Err(DeserializationError::new(
                DeserializationErrorKind::Converter,
                "A detailed key type is needed to load a map with hashed keys.",
                json,
                Some(cls),
            )
            .into());
        }
        Some(Value::Object(relocated)) => Some(relocated),
        Some(other) => return Err(invalid_shape(other, cls, "an object of hashed keys")),
    };

    let mut entries = Vec::with_capacity(input.len());
    for (key, value) in input {
        if key == META_KEY || key == KEYS_KEY {
            continue;
        }
        let loaded_key = match relocated.and_then(|relocated| relocated.get(key)) {
            Some(original) => ctx.load(original, key_info)?,
            None => load_key(key, key_info, ctx)?,
        };
        let loaded_value = ctx.load_attribute(value, Some(info.value_info()), key)?;
        entries.push((loaded_key, loaded_value));
    }

    info.from_entries(entries).map_err(|err| construct_failed(json, cls, err))
}

fn load_key(key: &str, key_info: &'static TypeInfo, ctx: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    let key = match ctx.options().key_transformer() {
        Some(transformer) => transformer(key),
        None => String::from(key),
    };
    let textual = key_info.is::<String>() || key_info.is::<char>() || key_info.is_dynamic();

    let json = if textual {
        Value::String(key)
    } else {
        match serde_json::from_str::<Value>(&key) {
            Ok(parsed @ (Value::Number(_) | Value::Bool(_))) => parsed,
            _ => Value::String(key),
        }
    };
    ctx.load(&json, key_info)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use serde_json::json;

    use crate::key_transform::camelcase;
    use crate::{DumpOptions, dump_with, load};

    #[test]
    fn string_keys() {
        let map = BTreeMap::from([(String::from("first_key"), 1_u8), (String::from("b"), 2)]);
        assert_eq!(crate::dump(&map).unwrap(), json!({"b": 2, "first_key": 1}));

        let options = DumpOptions::new().with_key_transformer(camelcase);
        assert_eq!(dump_with(&map, &options).unwrap(), json!({"b": 2, "firstKey": 1}));

        let loaded: HashMap<String, u8> = load(&json!({"a": 1})).unwrap();
        assert_eq!(loaded, HashMap::from([(String::from("a"), 1)]));
    }

    #[test]
    fn scalar_keys_round_trip() {
        let map = BTreeMap::from([('x', -1_i32), ('y', 1)]);
        let dumped = crate::dump(&map).unwrap();
        assert_eq!(dumped, json!({"x": -1, "y": 1}));
        assert_eq!(load::<BTreeMap<char, i32>>(&dumped).unwrap(), map);

        let flags = BTreeMap::from([(true, 1_u8)]);
        let dumped = crate::dump(&flags).unwrap();
        assert_eq!(dumped, json!({"true": 1}));
        assert_eq!(load::<BTreeMap<bool, u8>>(&dumped).unwrap(), flags);
    }

    #[test]
    fn strip_null_values() {
        let map = BTreeMap::from([(String::from("a"), None), (String::from("b"), Some(1_u8))]);
        let options = DumpOptions::new().with_strip_nulls(true);
        assert_eq!(dump_with(&map, &options).unwrap(), json!({"b": 1}));
    }
}
