//! The converters every namespace created with [`Namespace::new`] starts
//! with.
//!
//! [`Namespace::new`]: super::Namespace::new

use std::path::PathBuf;
use std::time::Duration;

use jk_reflect::info::ReflectKind;
use serde_json::Value;

use super::{DeserializeFn, SerializeFn, State};
use crate::converters::{enums, mapping, object, pointer, primitive, sequence, union};
use crate::descriptor::TypeDescriptor;

macro_rules! numbers {
    ($state:ident, int: $($int:ty),+; float: $($float:ty => $load:path),+) => {
        $(
            register($state, primitive::dump_number::<$int>, Some(primitive::load_int::<$int>), [TypeDescriptor::of::<$int>()], true);
        )+
        $(
            register($state, primitive::dump_number::<$float>, Some($load), [TypeDescriptor::of::<$float>()], true);
        )+
    };
}

pub(super) fn register_defaults(state: &mut State) {
    // ---- Leaves

    register(state, primitive::dump_unit, Some(primitive::load_unit), [TypeDescriptor::of::<()>()], true);
    register(state, primitive::dump_number::<bool>, Some(primitive::load_bool), [TypeDescriptor::of::<bool>()], true);
    numbers!(
        state,
        int: i8, i16, i32, i64, isize, u8, u16, u32, u64, usize;
        float: f32 => primitive::load_f32, f64 => primitive::load_f64
    );
    register(state, primitive::dump_char, Some(primitive::load_char), [TypeDescriptor::of::<char>()], true);
    register(state, primitive::dump_string, Some(primitive::load_string), [TypeDescriptor::of::<String>()], true);
    register(state, primitive::dump_str, None, [TypeDescriptor::of::<&'static str>()], true);
    register(state, primitive::dump_json, Some(primitive::load_json), [TypeDescriptor::of::<Value>()], true);
    register(state, primitive::dump_path, Some(primitive::load_path), [TypeDescriptor::of::<PathBuf>()], true);
    register(state, primitive::dump_duration, Some(primitive::load_duration), [TypeDescriptor::of::<Duration>()], true);

    #[cfg(feature = "chrono")]
    {
        use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

        use crate::converters::time;

        // Covers every `DateTime<Tz>`: they share one name.
        register(state, time::dump_datetime, Some(time::load_datetime), [TypeDescriptor::of::<DateTime<Utc>>()], true);
        register(state, time::dump_date, Some(time::load_date), [TypeDescriptor::of::<NaiveDate>()], true);
        register(state, time::dump_time, Some(time::load_time), [TypeDescriptor::of::<NaiveTime>()], true);
        register(state, time::dump_delta, Some(time::load_delta), [TypeDescriptor::of::<TimeDelta>()], true);
    }

    // ---- Families

    register(state, sequence::dump_sequence, Some(sequence::load_sequence), [ReflectKind::Tuple.into()], true);
    register(state, enums::dump_enum, Some(enums::load_enum), [ReflectKind::Enum.into()], true);
    register(state, union::dump_union, Some(union::load_union), [ReflectKind::Union.into()], true);
    register(state, pointer::dump_pointer, Some(pointer::load_pointer), [ReflectKind::Pointer.into()], true);

    register(state, mapping::dump_mapping, Some(mapping::load_mapping), [ReflectKind::Map.into()], false);
    register(
        state,
        sequence::dump_sequence,
        Some(sequence::load_sequence),
        [ReflectKind::List.into(), ReflectKind::Set.into()],
        false,
    );
    register(state, object::dump_object, Some(object::load_object), [ReflectKind::Struct.into()], false);
}

fn register<const N: usize>(
    state: &mut State,
    dump: SerializeFn,
    load: Option<DeserializeFn>,
    types: [TypeDescriptor; N],
    high_priority: bool,
) {
    state.serializers.register(dump, types.clone(), high_priority);
    if let Some(load) = load {
        state.deserializers.register(load, types, high_priority);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use jk_reflect::info::Typed;

    use crate::Namespace;

    #[test]
    fn every_family_is_covered() {
        let namespace = Namespace::new("defaults");
        for info in [
            <()>::type_info(),
            u8::type_info(),
            f32::type_info(),
            <(u8, String)>::type_info(),
            <Vec<u8>>::type_info(),
            <BTreeMap<String, u8>>::type_info(),
            <Option<u8>>::type_info(),
            <Box<u8>>::type_info(),
        ] {
            assert!(namespace.serializer(info).is_some(), "{}", info.type_path());
            assert!(namespace.deserializer(info).is_some(), "{}", info.type_path());
        }

        assert!(namespace.serializer(<&'static str>::type_info()).is_some());
        assert!(namespace.deserializer(<&'static str>::type_info()).is_none());
    }
}
