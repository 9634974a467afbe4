//! The load half of the dispatch core.
//!
//! For every value: handle `null`, take the fast path for plain primitives,
//! read metadata, pick the type to build, find its deserializer, call it and
//! run the validators.

use jk_reflect::Reflect;
use jk_reflect::info::{TypeInfo, Typed};
use jk_reflect::ops::ExtraFields;
use serde_json::Value;

use crate::context::LoadContext;
use crate::error::{DeserializationError, DeserializationErrorKind, Error, ValidationError};
use crate::name::short_name;
use crate::options::MetaHints;
use crate::verbosity::{META_KEY, read_classes};

/// Loads `json` into `target`, or into an inferred type for `None`.
pub(crate) fn load_value(
    json: &Value,
    target: Option<&'static TypeInfo>,
    ctx: &mut LoadContext<'_>,
) -> Result<Box<dyn Reflect>, Error> {
    let target = target.filter(|info| !info.is_dynamic());

    if json.is_null() {
        match target {
            None if ctx.strict() => {
                return Err(null_not_allowed(json, "Any (in strict mode)", None));
            }
            None => return Ok(Box::new(())),
            Some(info) if !info.accepts_none() => {
                return Err(null_not_allowed(json, &short_name(info), Some(info)));
            }
            Some(_) => {}
        }
    }

    if !ctx.strict()
        && let Some(info) = target
        && let Some(value) = fast_path(json, info)
    {
        validate(value.as_ref(), info, ctx)?;
        return Ok(value);
    }

    if let Some(meta) = json.get(META_KEY) {
        let hints: MetaHints = read_classes(meta).into_iter().collect();
        return ctx.with_meta(hints, |ctx| resolve_and_load(json, target, ctx));
    }
    resolve_and_load(json, target, ctx)
}

fn null_not_allowed(json: &Value, name: &str, target: Option<&TypeInfo>) -> Error {
    DeserializationError::new(
        DeserializationErrorKind::NullNotAllowed,
        format!("NoneType cannot be deserialized into {name}"),
        json,
        target,
    )
    .into()
}

/// Primitives that need no conversion, and raw JSON values.
fn fast_path(json: &Value, info: &TypeInfo) -> Option<Box<dyn Reflect>> {
    if info.is::<Value>() {
        return Some(Box::new(json.clone()));
    }
    match json {
        Value::Bool(value) if info.is::<bool>() => Some(Box::new(*value)),
        Value::String(value) if info.is::<String>() => Some(Box::new(value.clone())),
        Value::Number(number) if info.is::<i64>() => number.as_i64().map(|v| Box::new(v) as Box<dyn Reflect>),
        Value::Number(number) if info.is::<u64>() => number.as_u64().map(|v| Box::new(v) as Box<dyn Reflect>),
        Value::Number(number) if info.is::<f64>() && number.is_f64() => {
            number.as_f64().map(|v| Box::new(v) as Box<dyn Reflect>)
        }
        _ => None,
    }
}

fn resolve_and_load(
    json: &Value,
    target: Option<&'static TypeInfo>,
    ctx: &mut LoadContext<'_>,
) -> Result<Box<dyn Reflect>, Error> {
    let from_meta = match (target, ctx.meta_class()) {
        // Metadata is only consulted for open targets.
        (None, Some(name)) => match ctx.namespace().resolve_class(name) {
            Some(info) => Some(info),
            None => {
                return Err(DeserializationError::new(
                    DeserializationErrorKind::UnknownClass,
                    format!(
                        "Could not find a suitable type for \"{name}\" in the metadata. \
                         Announce it or derive it with `#[reflect(auto_register)]`."
                    ),
                    json,
                    None,
                )
                .into());
            }
        },
        _ => None,
    };

    let (info, inferred) = determine_precedence(target, from_meta, shape_info(json));
    ctx.with_inferred(inferred, |ctx| dispatch(json, info, ctx))
}

/// Picks the type to build: the caller's target, then the type named by
/// metadata, then the type the JSON shape suggests.
///
/// Metadata is only read for open targets, so it never replaces a type the
/// caller asked for.
///
/// Returns the type and whether it differs from the caller's target.
fn determine_precedence(
    target: Option<&'static TypeInfo>,
    from_meta: Option<&'static TypeInfo>,
    from_shape: &'static TypeInfo,
) -> (&'static TypeInfo, bool) {
    match target {
        Some(target) => (target, false),
        None => (from_meta.unwrap_or(from_shape), true),
    }
}

/// The type a JSON value loads into when nothing else is known.
fn shape_info(json: &Value) -> &'static TypeInfo {
    match json {
        Value::Null => <()>::type_info(),
        Value::Bool(_) => bool::type_info(),
        Value::Number(number) if number.is_i64() => i64::type_info(),
        Value::Number(number) if number.is_u64() => u64::type_info(),
        Value::Number(_) => f64::type_info(),
        Value::String(_) => String::type_info(),
        Value::Array(_) => <Vec<Box<dyn Reflect>>>::type_info(),
        Value::Object(_) => ExtraFields::type_info(),
    }
}

fn dispatch(json: &Value, info: &'static TypeInfo, ctx: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    let Some(found) = ctx.namespace().resolve_deserializer(info) else {
        return Err(DeserializationError::new(
            DeserializationErrorKind::NoDeserializer,
            format!("No deserializer for type \"{}\".", short_name(info)),
            json,
            Some(info),
        )
        .into());
    };

    let value = (found.func)(json, found.target, ctx).map_err(|err| wrap_custom(err, json, info))?;

    let value = match info.as_newtype() {
        Some(newtype) if found.via_newtype(info) => newtype.wrap(value).map_err(|err| {
            Error::from(DeserializationError::new(
                DeserializationErrorKind::Construct,
                format!("Could not build \"{}\": {err}.", short_name(info)),
                json,
                Some(info),
            ))
        })?,
        _ => value,
    };

    validate(value.as_ref(), info, ctx)?;
    Ok(value)
}

fn wrap_custom(err: Error, json: &Value, info: &TypeInfo) -> Error {
    match err {
        Error::Custom(message) => DeserializationError::new(
            DeserializationErrorKind::Converter,
            format!("Could not deserialize value \"{json}\" into \"{}\". {message}", short_name(info)),
            json,
            Some(info),
        )
        .into(),
        other => other,
    }
}

/// Runs the validator registered for `info`, if any.
fn validate(value: &dyn Reflect, info: &'static TypeInfo, ctx: &LoadContext<'_>) -> Result<(), Error> {
    let Some(validator) = ctx.namespace().validator(info) else {
        return Ok(());
    };
    match validator(value) {
        Ok(true) => Ok(()),
        Ok(false) => Err(ValidationError::new("Validation failed.", info).into()),
        Err(err @ Error::Validation(_)) => Err(err),
        Err(err) => Err(ValidationError::new(err.to_string(), info).into()),
    }
}

#[cfg(test)]
mod tests {
    use jk_reflect::Reflect;
    use jk_reflect::info::Typed;
    use jk_reflect::ops::ExtraFields;
    use serde_json::json;

    use super::{determine_precedence, shape_info};

    #[test]
    fn shapes() {
        assert!(shape_info(&json!(null)).is::<()>());
        assert!(shape_info(&json!(-3)).is::<i64>());
        assert!(shape_info(&json!(u64::MAX)).is::<u64>());
        assert!(shape_info(&json!(1.5)).is::<f64>());
        assert!(shape_info(&json!([1])).is::<Vec<Box<dyn Reflect>>>());
        assert!(shape_info(&json!({})).is::<ExtraFields>());
    }

    #[test]
    fn precedence() {
        let shape = String::type_info();
        let meta = u8::type_info();

        let (info, inferred) = determine_precedence(None, None, shape);
        assert!(info.is::<String>() && inferred);
        let (info, inferred) = determine_precedence(None, Some(meta), shape);
        assert!(info.is::<u8>() && inferred);
        let (info, inferred) = determine_precedence(Some(i32::type_info()), None, shape);
        assert!(info.is::<i32>() && !inferred);
    }
}
