//! The dump half of the dispatch core.

use jk_reflect::Reflect;
use jk_reflect::info::{ReflectKind, TypeInfo};
use jk_reflect::ops::ReflectRef;
use serde_json::Value;

use crate::context::DumpContext;
use crate::error::{Error, SerializationError, SerializationErrorKind};
use crate::name::short_name;
use crate::verbosity::Verbosity;

/// Dumps `value` as `cls`, or as its own type for `None`.
///
/// Every value with an identity of its own is tracked while its serializer
/// runs: reaching it again from inside is a cycle.
pub(crate) fn dump_value(
    value: &dyn Reflect,
    cls: Option<&'static TypeInfo>,
    ctx: &mut DumpContext<'_>,
) -> Result<Value, Error> {
    let value = value.as_reflect();
    let runtime = value.reflect_type_info();

    let cls = match cls {
        Some(cls) if !cls.is_dynamic() && cls.type_id() != runtime.type_id() => {
            if !runtime.as_struct().is_some_and(|s| s.extends(cls.type_id())) {
                return Err(Error::usage(format!(
                    "A value of type \"{}\" cannot be dumped as \"{}\": only a base struct can stand for it.",
                    short_name(runtime),
                    short_name(cls),
                )));
            }
            cls
        }
        _ => runtime,
    };

    let tracked = !matches!(runtime.kind(), ReflectKind::Opaque | ReflectKind::Enum);
    let identity = value.reflect_identity();
    if tracked && !ctx.enter(identity) {
        return Err(SerializationError::new(
            SerializationErrorKind::RecursionDetected,
            format!(
                "Endless recursion detected while dumping a value of type \"{}\".",
                short_name(runtime)
            ),
            Some(runtime),
        )
        .into());
    }

    let result = dispatch(value, cls, ctx);

    if tracked {
        ctx.leave(identity);
    }
    result
}

fn dispatch(value: &dyn Reflect, cls: &'static TypeInfo, ctx: &mut DumpContext<'_>) -> Result<Value, Error> {
    let namespace = ctx.namespace();
    if ctx.options().verbose().contains(Verbosity::WITH_CLASS_INFO) {
        namespace.announce_dumped(cls);
    }

    let Some(found) = namespace.resolve_serializer(cls) else {
        return Err(SerializationError::new(
            SerializationErrorKind::NoSerializer,
            format!("No serializer for type \"{}\".", short_name(cls)),
            Some(cls),
        )
        .into());
    };

    let result = if found.via_newtype(cls) {
        match value.reflect_ref() {
            ReflectRef::Newtype(inner) => (found.func)(inner, found.target, ctx),
            _ => Err(Error::custom("expected a newtype value")),
        }
    } else {
        (found.func)(value, cls, ctx)
    };

    result.map_err(|err| match err {
        Error::Custom(message) => SerializationError::new(
            SerializationErrorKind::Converter,
            format!("Could not dump a value of type \"{}\". {message}", short_name(cls)),
            Some(cls),
        )
        .into(),
        other => other,
    })
}
