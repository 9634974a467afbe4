//! Enums with unit variants, dumped by name or by value.

use jk_reflect::Reflect;
use jk_reflect::info::{EnumInfo, EnumValue, TypeInfo};
use jk_reflect::ops::ReflectRef;
use serde_json::Value;

use crate::context::{DumpContext, LoadContext};
use crate::error::Error;

/// Dumps the variant name, or its value when
/// [`use_enum_name`](crate::DumpOptions::use_enum_name) is off.
pub fn dump_enum(value: &dyn Reflect, cls: &'static TypeInfo, ctx: &mut DumpContext<'_>) -> Result<Value, Error> {
    let (Some(info), ReflectRef::Enum(value)) = (cls.as_enum(), value.reflect_ref()) else {
        return Err(Error::custom("the value is not an enum"));
    };
    let Some(variant) = info.variant_at(value.variant_index()) else {
        return Err(Error::custom(format_args!("no variant at index {}", value.variant_index())));
    };

    if ctx.options().use_enum_name() {
        return Ok(Value::String(String::from(variant.name())));
    }
    Ok(match variant.value() {
        EnumValue::Int(value) => Value::from(value),
        EnumValue::Str(value) => Value::String(String::from(value)),
    })
}

/// Loads a variant from its name or its value.
///
/// [`LoadOptions::use_enum_name`](crate::LoadOptions::use_enum_name) picks
/// one of the two, `None` tries the name first.
pub fn load_enum(json: &Value, cls: &'static TypeInfo, ctx: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    let Some(info) = cls.as_enum() else {
        return Err(Error::custom("the enum deserializer only handles enums"));
    };

    let index = match ctx.options().use_enum_name() {
        Some(true) => by_name(json, info),
        Some(false) => by_value(json, info),
        None => by_name(json, info).or_else(|| by_value(json, info)),
    };

    index
        .and_then(|index| info.from_index(index))
        .ok_or_else(|| Error::custom(format_args!("{json} is not a variant of the enum")))
}

fn by_name(json: &Value, info: &EnumInfo) -> Option<usize> {
    json.as_str().and_then(|name| info.index_of_name(name))
}

fn by_value(json: &Value, info: &EnumInfo) -> Option<usize> {
    let value = match json {
        Value::Number(number) => EnumValue::Int(number.as_i64()?),
        Value::String(text) => {
            let variant = info.variants().iter().find(|variant| match variant.value() {
                EnumValue::Str(value) => value == text,
                EnumValue::Int(_) => false,
            })?;
            variant.value()
        }
        _ => return None,
    };
    info.index_of_value(&value)
}

#[cfg(test)]
mod tests {
    use jk_reflect::derive::Reflect;
    use serde_json::json;

    use crate::{DumpOptions, LoadOptions, dump_with, load_with};

    #[derive(Reflect, Debug, PartialEq)]
    enum Color {
        Red = 1,
        Green,
        #[reflect(value = "bl")]
        Blue,
    }

    #[test]
    fn by_name_by_default() {
        assert_eq!(crate::dump(&Color::Green).unwrap(), json!("Green"));
        assert_eq!(crate::load::<Color>(&json!("Blue")).unwrap(), Color::Blue);
        // Falls back to the value.
        assert_eq!(crate::load::<Color>(&json!(1)).unwrap(), Color::Red);
        assert_eq!(crate::load::<Color>(&json!("bl")).unwrap(), Color::Blue);
    }

    #[test]
    fn by_value() {
        let options = DumpOptions::new().with_use_enum_name(false);
        assert_eq!(dump_with(&Color::Green, &options).unwrap(), json!(2));
        assert_eq!(dump_with(&Color::Blue, &options).unwrap(), json!("bl"));

        let options = LoadOptions::new().with_use_enum_name(Some(false));
        assert_eq!(load_with::<Color>(&json!(2), &options).unwrap(), Color::Green);
        assert!(load_with::<Color>(&json!("Green"), &options).is_err());
    }

    #[test]
    fn unknown_variant() {
        let err = crate::load::<Color>(&json!("Purple")).unwrap_err();
        assert!(err.to_string().contains("is not a variant of the enum"));
    }
}
