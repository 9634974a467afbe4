//! Leaf values: numbers, text, `()`, paths, durations and raw JSON.
//!
//! Outside strict mode the deserializers are lenient: integers accept
//! numeric strings and whole floats, strings accept numbers and bools.

use std::path::{MAIN_SEPARATOR, PathBuf};
use std::time::Duration;

use jk_reflect::Reflect;
use jk_reflect::info::TypeInfo;
use serde_json::{Number, Value};

use crate::context::{DumpContext, LoadContext};
use crate::converters::invalid_shape;
use crate::error::Error;

fn downcast<'v, T: 'static>(value: &'v dyn Reflect) -> Result<&'v T, Error> {
    value
        .downcast_ref::<T>()
        .ok_or_else(|| Error::custom(format_args!("expected a value of type `{}`", core::any::type_name::<T>())))
}

// -----------------------------------------------------------------------------
// Numbers and bools

/// Dumps any number or bool. Non-finite floats dump as `null`.
pub fn dump_number<T>(value: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error>
where
    T: Copy + Into<Value> + 'static,
{
    Ok((*downcast::<T>(value)?).into())
}

/// Loads an integer, failing if it is out of the range of `T`.
pub fn load_int<T>(json: &Value, cls: &'static TypeInfo, ctx: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error>
where
    T: TryFrom<i64> + TryFrom<u64> + Reflect,
{
    let number = to_number(json, cls, ctx.strict(), "an integer")?;

    let converted = if let Some(int) = number.as_i64() {
        <T as TryFrom<i64>>::try_from(int).ok()
    } else if let Some(int) = number.as_u64() {
        <T as TryFrom<u64>>::try_from(int).ok()
    } else {
        match number.as_f64() {
            Some(float) if !ctx.strict() && float.fract() == 0.0 && float.abs() < 2f64.powi(53) => {
                <T as TryFrom<i64>>::try_from(float as i64).ok()
            }
            _ => return Err(invalid_shape(json, cls, "an integer")),
        }
    };

    match converted {
        Some(value) => Ok(Box::new(value)),
        None => Err(Error::custom(format_args!("{number} is out of range"))),
    }
}

pub fn load_f64(json: &Value, cls: &'static TypeInfo, ctx: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    Ok(Box::new(load_float(json, cls, ctx)?))
}

pub fn load_f32(json: &Value, cls: &'static TypeInfo, ctx: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    Ok(Box::new(load_float(json, cls, ctx)? as f32))
}

fn load_float(json: &Value, cls: &'static TypeInfo, ctx: &LoadContext<'_>) -> Result<f64, Error> {
    let number = to_number(json, cls, ctx.strict(), "a number")?;
    number
        .as_f64()
        .ok_or_else(|| invalid_shape(json, cls, "a number"))
}

fn to_number(json: &Value, cls: &'static TypeInfo, strict: bool, expected: &str) -> Result<Number, Error> {
    match json {
        Value::Number(number) => Ok(number.clone()),
        Value::String(text) if !strict => text
            .trim()
            .parse::<Number>()
            .map_err(|_| invalid_shape(json, cls, expected)),
        _ => Err(invalid_shape(json, cls, expected)),
    }
}

pub fn load_bool(json: &Value, cls: &'static TypeInfo, _: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    match json {
        Value::Bool(flag) => Ok(Box::new(*flag)),
        _ => Err(invalid_shape(json, cls, "a bool")),
    }
}

// -----------------------------------------------------------------------------
// Text

pub fn dump_string(value: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error> {
    Ok(Value::String(downcast::<String>(value)?.clone()))
}

/// Dumps a `&'static str`. There is no matching deserializer: borrowed text
/// cannot be built from JSON.
pub fn dump_str(value: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error> {
    Ok(Value::String(String::from(*downcast::<&'static str>(value)?)))
}

/// Loads a string.
///
/// When the type was not requested but inferred from the JSON shape, a
/// string holding an RFC 3339 datetime loads as a datetime.
pub fn load_string(json: &Value, cls: &'static TypeInfo, ctx: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    match json {
        Value::String(text) => {
            #[cfg(feature = "chrono")]
            if ctx.inferred()
                && let Some(datetime) = super::time::parse_datetime(text)
            {
                return Ok(Box::new(datetime));
            }
            Ok(Box::new(text.clone()))
        }
        Value::Number(number) if !ctx.strict() => Ok(Box::new(number.to_string())),
        Value::Bool(flag) if !ctx.strict() => Ok(Box::new(flag.to_string())),
        _ => Err(invalid_shape(json, cls, "a string")),
    }
}

pub fn dump_char(value: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error> {
    Ok(Value::String(downcast::<char>(value)?.to_string()))
}

pub fn load_char(json: &Value, cls: &'static TypeInfo, _: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    let mut chars = json.as_str().map(str::chars);
    match chars.as_mut().map(|chars| (chars.next(), chars.next())) {
        Some((Some(single), None)) => Ok(Box::new(single)),
        _ => Err(invalid_shape(json, cls, "a string of one character")),
    }
}

// -----------------------------------------------------------------------------
// Unit and raw JSON

pub fn dump_unit(_: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error> {
    Ok(Value::Null)
}

pub fn load_unit(json: &Value, cls: &'static TypeInfo, _: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    match json {
        Value::Null => Ok(Box::new(())),
        _ => Err(invalid_shape(json, cls, "null")),
    }
}

pub fn dump_json(value: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error> {
    Ok(downcast::<Value>(value)?.clone())
}

pub fn load_json(json: &Value, _: &'static TypeInfo, _: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    Ok(Box::new(json.clone()))
}

// -----------------------------------------------------------------------------
// Paths and durations

/// Dumps a path with `/` separators on every platform.
pub fn dump_path(value: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error> {
    let path = downcast::<PathBuf>(value)?;
    Ok(Value::String(path.to_string_lossy().replace(MAIN_SEPARATOR, "/")))
}

pub fn load_path(json: &Value, cls: &'static TypeInfo, _: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    match json {
        Value::String(text) => Ok(Box::new(PathBuf::from(text))),
        _ => Err(invalid_shape(json, cls, "a string")),
    }
}

/// Dumps a duration as seconds.
pub fn dump_duration(value: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error> {
    Ok(Value::from(downcast::<Duration>(value)?.as_secs_f64()))
}

pub fn load_duration(json: &Value, cls: &'static TypeInfo, ctx: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    let seconds = load_float(json, cls, ctx)?;
    Duration::try_from_secs_f64(seconds)
        .map(|duration| Box::new(duration) as Box<dyn Reflect>)
        .map_err(Error::custom)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use serde_json::json;

    use crate::{LoadOptions, load, load_with};

    #[test]
    fn ints() {
        assert_eq!(load::<i8>(&json!(-3)).unwrap(), -3);
        assert_eq!(load::<u16>(&json!("12")).unwrap(), 12);
        assert_eq!(load::<u32>(&json!(4.0)).unwrap(), 4);
        assert!(load::<u8>(&json!(300)).is_err());
        assert!(load::<u8>(&json!(-1)).is_err());
        assert!(load::<u8>(&json!(1.5)).is_err());

        let strict = LoadOptions::new().with_strict(true);
        assert!(load_with::<u16>(&json!("12"), &strict).is_err());
        assert!(load_with::<u32>(&json!(4.0), &strict).is_err());
    }

    #[test]
    fn floats() {
        assert_eq!(load::<f64>(&json!(2)).unwrap(), 2.0);
        assert_eq!(load::<f32>(&json!(0.5)).unwrap(), 0.5);
        assert_eq!(crate::dump(&f64::NAN).unwrap(), json!(null));
        assert_eq!(crate::dump(&1.25_f32).unwrap(), json!(1.25));
    }

    #[test]
    fn text() {
        assert_eq!(load::<String>(&json!(12)).unwrap(), "12");
        assert_eq!(load::<String>(&json!(true)).unwrap(), "true");
        let strict = LoadOptions::new().with_strict(true);
        assert!(load_with::<String>(&json!(12), &strict).is_err());

        assert_eq!(load::<char>(&json!("x")).unwrap(), 'x');
        assert!(load::<char>(&json!("xy")).is_err());
        assert_eq!(crate::dump(&'y').unwrap(), json!("y"));
        assert_eq!(crate::dump(&"static").unwrap(), json!("static"));
    }

    #[test]
    fn paths_and_durations() {
        let path = PathBuf::from("a").join("b").join("c.txt");
        assert_eq!(crate::dump(&path).unwrap(), json!("a/b/c.txt"));
        assert_eq!(load::<PathBuf>(&json!("a/b")).unwrap(), PathBuf::from("a/b"));

        assert_eq!(crate::dump(&Duration::from_millis(1500)).unwrap(), json!(1.5));
        assert_eq!(load::<Duration>(&json!(2)).unwrap(), Duration::from_secs(2));
        assert!(load::<Duration>(&json!(-1)).is_err());
    }

    #[test]
    fn unit_and_raw_json() {
        assert_eq!(crate::dump(&()).unwrap(), json!(null));
        load::<()>(&json!(null)).unwrap();
        let raw = json!({"a": [1, null]});
        assert_eq!(load::<serde_json::Value>(&raw).unwrap(), raw);
    }
}
