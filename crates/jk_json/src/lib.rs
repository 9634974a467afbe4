//! Dumping object graphs to JSON values and loading them back.
//!
//! Any type implementing [`Reflect`] can be dumped: the engine looks up a
//! serializer for its type in a [`Namespace`], falling back on base structs
//! and on the type's family (struct, list, map, ...). Loading walks the
//! same way over the target type and builds values through the
//! constructors recorded by the reflection layer.
//!
//! - Options travel with every nested call, see [`DumpOptions`] and
//!   [`LoadOptions`].
//! - Custom converters are registered per namespace; [`fork`] copies a
//!   namespace so it can be changed in isolation.
//! - Verbose dumps record the concrete types found (see [`Verbosity`]), so
//!   the output loads back without naming its type.
//!
//! # Examples
//!
//! ```
//! use jk_reflect::derive::Reflect;
//! use serde_json::json;
//!
//! #[derive(Reflect, Debug, PartialEq)]
//! struct Car {
//!     color: String,
//!     owner: Option<String>,
//! }
//!
//! let car = Car { color: "Red".into(), owner: None };
//! let dumped = jk_json::dump(&car).unwrap();
//! assert_eq!(dumped, json!({"color": "Red", "owner": null}));
//!
//! let loaded: Car = jk_json::load(&json!({"color": "Blue"})).unwrap();
//! assert_eq!(loaded, Car { color: "Blue".into(), owner: None });
//! ```

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod context;
mod descriptor;
mod dump;
mod error;
mod load;
mod namespace;
mod options;
mod parallel;
mod verbosity;

pub mod converters;
pub mod key_transform;
pub mod name;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use context::{DumpContext, LoadContext};
pub use descriptor::TypeDescriptor;
pub use error::{DecodeError, DeserializationError, DeserializationErrorKind, Error};
pub use error::{SerializationError, SerializationErrorKind, ValidationError};
pub use namespace::{DeserializeFn, Namespace, SerializeFn, ValidateFn};
pub use options::{AttrGetter, DumpOptions, LoadOptions, MetaHints};
pub use verbosity::{META_KEY, Verbosity};

// -----------------------------------------------------------------------------
// Imports

use jk_reflect::Reflect;
use jk_reflect::info::{TypeInfo, Typed};
use serde_json::Value;

use crate::cache::CallGuard;

// -----------------------------------------------------------------------------
// Dump

/// Dumps `value` with the default options.
#[inline]
pub fn dump<T: Reflect>(value: &T) -> Result<Value, Error> {
    dump_with(value, &DumpOptions::default())
}

/// Dumps `value` with `options`.
pub fn dump_with(value: &dyn Reflect, options: &DumpOptions) -> Result<Value, Error> {
    let _guard = CallGuard::enter(options.namespace());
    dump::dump_value(value, None, &mut DumpContext::new(options))
}

/// Dumps `value` as `cls`.
///
/// `cls` must be a struct the value's type extends (or its own type): only
/// the attributes `cls` declares are dumped.
///
/// ```
/// use jk_json::{DumpOptions, TypeDescriptor};
/// use jk_reflect::derive::Reflect;
/// use serde_json::json;
///
/// #[derive(Reflect)]
/// struct Animal {
///     name: String,
/// }
///
/// #[derive(Reflect)]
/// #[reflect(extends(Animal))]
/// struct Dog {
///     name: String,
///     good: bool,
/// }
///
/// let dog = Dog { name: "Rex".into(), good: true };
/// let dumped = jk_json::dump_as(&dog, TypeDescriptor::of::<Animal>(), &DumpOptions::new()).unwrap();
/// assert_eq!(dumped, json!({"name": "Rex"}));
/// ```
pub fn dump_as(value: &dyn Reflect, cls: TypeDescriptor, options: &DumpOptions) -> Result<Value, Error> {
    let _guard = CallGuard::enter(options.namespace());
    let cls = match cls {
        TypeDescriptor::Static(info) => Some(info),
        TypeDescriptor::Any => None,
        TypeDescriptor::Named(name) => match options.namespace().resolve_class(&name) {
            Some(info) => Some(info),
            None => return Err(Error::usage(format!("Unknown type \"{name}\": announce it first."))),
        },
        TypeDescriptor::Kind(kind) => {
            return Err(Error::usage(format!("Cannot dump a value as the {kind} family.")));
        }
    };
    dump::dump_value(value, cls, &mut DumpContext::new(options))
}

/// Dumps `value` to a JSON string.
pub fn dumps(value: &dyn Reflect, options: &DumpOptions) -> Result<String, Error> {
    let dumped = dump_with(value, options)?;
    serde_json::to_string(&dumped).map_err(Error::custom)
}

/// Dumps `value` to UTF-8 JSON bytes.
pub fn dumpb(value: &dyn Reflect, options: &DumpOptions) -> Result<Vec<u8>, Error> {
    let dumped = dump_with(value, options)?;
    serde_json::to_vec(&dumped).map_err(Error::custom)
}

// -----------------------------------------------------------------------------
// Load

/// Loads `json` into a `T` with the default options.
#[inline]
pub fn load<T: Reflect + Typed>(json: &Value) -> Result<T, Error> {
    load_with(json, &LoadOptions::default())
}

/// Loads `json` into a `T` with `options`.
pub fn load_with<T: Reflect + Typed>(json: &Value, options: &LoadOptions) -> Result<T, Error> {
    let loaded = load_as(json, TypeDescriptor::of::<T>(), options)?;
    T::from_boxed(loaded).map_err(|loaded| {
        Error::custom(format_args!(
            "The deserializer of \"{}\" returned a value of type \"{}\".",
            T::type_path(),
            loaded.reflect_type_path(),
        ))
    })
}

/// Loads `json` into the type described by `target`.
///
/// [`TypeDescriptor::Any`] infers the type from metadata or from the shape
/// of the value; [`TypeDescriptor::Named`] resolves an announced or
/// auto-registered type.
pub fn load_as(json: &Value, target: TypeDescriptor, options: &LoadOptions) -> Result<Box<dyn Reflect>, Error> {
    let _guard = CallGuard::enter(options.namespace());
    let target: Option<&'static TypeInfo> = match target {
        TypeDescriptor::Static(info) => Some(info),
        TypeDescriptor::Any => None,
        TypeDescriptor::Named(name) => match options.namespace().resolve_class(&name) {
            Some(info) => Some(info),
            None => {
                return Err(DeserializationError::new(
                    DeserializationErrorKind::UnknownClass,
                    format!("Could not find a suitable type for \"{name}\". Announce it first."),
                    json,
                    None,
                )
                .into());
            }
        },
        TypeDescriptor::Kind(kind) => {
            return Err(Error::usage(format!(
                "Cannot load into the {kind} family: name a concrete type."
            )));
        }
    };
    load::load_value(json, target, &mut LoadContext::new(options))
}

/// Loads `json` into whatever its metadata or its shape suggests.
///
/// ```
/// use jk_json::LoadOptions;
/// use serde_json::json;
///
/// let loaded = jk_json::load_any(&json!([1, "a"]), &LoadOptions::new()).unwrap();
/// let items = loaded.take::<Vec<Box<dyn jk_reflect::Reflect>>>().unwrap();
/// assert!(items[0].is::<i64>());
/// assert!(items[1].is::<String>());
/// ```
#[inline]
pub fn load_any(json: &Value, options: &LoadOptions) -> Result<Box<dyn Reflect>, Error> {
    load_as(json, TypeDescriptor::Any, options)
}

/// Parses `text` and loads it into a `T`.
pub fn loads<T: Reflect + Typed>(text: &str, options: &LoadOptions) -> Result<T, Error> {
    let json: Value = serde_json::from_str(text)
        .map_err(|err| DecodeError::new(String::from(text), Some(T::type_info()), err))?;
    load_with(&json, options)
}

/// Parses UTF-8 `bytes` and loads them into a `T`.
pub fn loadb<T: Reflect + Typed>(bytes: &[u8], options: &LoadOptions) -> Result<T, Error> {
    let json: Value = serde_json::from_slice(bytes).map_err(|err| {
        DecodeError::new(String::from_utf8_lossy(bytes).into_owned(), Some(T::type_info()), err)
    })?;
    load_with(&json, options)
}

// -----------------------------------------------------------------------------
// Global namespace shorthands

/// Forks the global namespace, see [`Namespace::fork`].
#[inline]
pub fn fork(name: Option<&str>) -> Namespace {
    Namespace::global().fork(name)
}

/// Announces `T` in the global namespace, see [`Namespace::announce`].
#[inline]
pub fn announce_type<T: Typed>(name: Option<&str>) {
    Namespace::global().announce(T::type_info(), name);
}

/// Turns the warnings of the global namespace off, or back on.
#[inline]
pub fn suppress_warnings(suppress: bool) {
    Namespace::global().suppress_warnings(suppress);
}

/// Turns the warnings with `code` off in the global namespace.
#[inline]
pub fn suppress_warning(code: &str) {
    Namespace::global().suppress_warning(code);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use jk_reflect::Reflect;
    use jk_reflect::derive::Reflect;
    use jk_reflect::info::{ReflectKind, TypePath, Typed};
    use serde_json::json;

    use crate::{DeserializationErrorKind, DumpOptions, Error, LoadOptions, TypeDescriptor, Verbosity};

    #[derive(Reflect, Debug, PartialEq)]
    struct Point {
        x: i32,
    }

    #[derive(Reflect, Debug, PartialEq)]
    struct Dog {
        name: String,
        good: bool,
    }

    #[derive(Reflect)]
    struct Owner {
        pet: Box<dyn Reflect>,
    }

    #[test]
    fn verbose_round_trip() {
        let owner = Owner {
            pet: Box::new(Dog { name: "rex".into(), good: true }),
        };
        let options = DumpOptions::new().with_verbose(Verbosity::WITH_CLASS_INFO);
        let dumped = crate::dump_with(&owner, &options).unwrap();
        assert_eq!(
            dumped,
            json!({
                "pet": {"name": "rex", "good": true},
                "-meta": {"classes": {"/": Owner::type_path(), "/pet": Dog::type_path()}},
            })
        );

        let loaded = crate::load_any(&dumped, &LoadOptions::new()).unwrap();
        let owner = loaded.take::<Owner>().unwrap();
        let pet = owner.pet.downcast_ref::<Dog>().unwrap();
        assert_eq!(pet, &Dog { name: "rex".into(), good: true });
    }

    #[test]
    fn verbose_lists_carry_meta_per_item() {
        let options = DumpOptions::new().with_verbose(Verbosity::WITH_CLASS_INFO);
        let dumped = crate::dump_with(&vec![Point { x: 1 }], &options).unwrap();
        assert_eq!(dumped, json!([{"x": 1, "-meta": {"classes": {"/": Point::type_path()}}}]));

        let loaded = crate::load_any(&dumped, &LoadOptions::new()).unwrap();
        let items = loaded.take::<Vec<Box<dyn Reflect>>>().unwrap();
        assert_eq!(items[0].downcast_ref::<Point>(), Some(&Point { x: 1 }));
    }

    #[test]
    fn hashed_map_keys() {
        let map = BTreeMap::from([((1_u8, 2_u8), String::from("a")), ((3, 4), String::from("b"))]);
        let dumped = crate::dump(&map).unwrap();
        assert_eq!(dumped["-keys"].as_object().unwrap().len(), 2);

        let loaded: BTreeMap<(u8, u8), String> = crate::load(&dumped).unwrap();
        assert_eq!(loaded, map);

        let err = crate::load::<BTreeMap<String, String>>(&dumped).unwrap_err();
        assert_eq!(err.as_deserialization().unwrap().kind(), DeserializationErrorKind::Converter);
    }

    #[test]
    fn plain_map_keys() {
        let map = BTreeMap::from([(1_u8, true), (2, false)]);
        let dumped = crate::dump(&map).unwrap();
        assert_eq!(dumped, json!({"1": true, "2": false}));
        assert_eq!(crate::load::<BTreeMap<u8, bool>>(&dumped).unwrap(), map);
    }

    fn positive(value: &dyn Reflect) -> Result<bool, Error> {
        Ok(value.downcast_ref::<i32>().is_some_and(|value| *value > 0))
    }

    #[test]
    fn validators() {
        let namespace = crate::fork(Some("validated"));
        namespace.register_validator(positive, [TypeDescriptor::of::<i32>()]);
        let options = LoadOptions::new().with_namespace(namespace);

        assert_eq!(crate::load_with::<i32>(&json!(3), &options).unwrap(), 3);
        let err = crate::load_with::<i32>(&json!(-3), &options).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        // Only the fork validates.
        assert_eq!(crate::load::<i32>(&json!(-3)).unwrap(), -3);
    }

    #[test]
    fn text_and_bytes() {
        let text = crate::dumps(&Point { x: 1 }, &DumpOptions::new()).unwrap();
        assert_eq!(text, r#"{"x":1}"#);
        let bytes = crate::dumpb(&Point { x: 2 }, &DumpOptions::new()).unwrap();
        assert_eq!(bytes, br#"{"x":2}"#);

        let options = LoadOptions::new();
        assert_eq!(crate::loads::<Point>(r#"{"x": 5}"#, &options).unwrap(), Point { x: 5 });
        assert_eq!(crate::loadb::<Point>(br#"{"x": 6}"#, &options).unwrap(), Point { x: 6 });

        let Error::Decode(err) = crate::loads::<Point>("{x", &options).unwrap_err() else {
            panic!("expected a decode error");
        };
        assert_eq!(err.text(), "{x");
        assert_eq!(err.target(), Some(Point::type_path()));
    }

    #[test]
    fn parallel_sequences() {
        let numbers: Vec<u32> = (0..100).collect();
        let dumped = crate::dump_with(&numbers, &DumpOptions::new().with_tasks(4)).unwrap();
        assert_eq!(dumped, json!(numbers));

        let loaded: Vec<u32> = crate::load_with(&dumped, &LoadOptions::new().with_tasks(4)).unwrap();
        assert_eq!(loaded, numbers);
    }

    #[test]
    fn descriptors() {
        let err = crate::dump_as(&1_u8, TypeDescriptor::Kind(ReflectKind::List), &DumpOptions::new()).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));

        let err = crate::load_as(&json!({}), TypeDescriptor::named("nowhere::Missing"), &LoadOptions::new())
            .unwrap_err();
        assert_eq!(err.as_deserialization().unwrap().kind(), DeserializationErrorKind::UnknownClass);

        let namespace = crate::fork(Some("announced"));
        namespace.announce(Point::type_info(), Some("announced-point"));
        let options = LoadOptions::new().with_namespace(namespace);
        let loaded = crate::load_as(&json!({"x": 9}), TypeDescriptor::named("announced-point"), &options).unwrap();
        assert_eq!(loaded.take::<Point>().unwrap(), Point { x: 9 });

        // The default namespace never heard of the name.
        let err = crate::load_as(&json!({"x": 9}), TypeDescriptor::named("announced-point"), &LoadOptions::new())
            .unwrap_err();
        assert_eq!(err.as_deserialization().unwrap().kind(), DeserializationErrorKind::UnknownClass);
    }

    #[test]
    fn dump_as_needs_a_base() {
        let dog = Dog { name: "rex".into(), good: true };
        let err = crate::dump_as(&dog, TypeDescriptor::of::<Point>(), &DumpOptions::new()).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));

        let dumped = crate::dump_as(&dog, TypeDescriptor::of::<Dog>(), &DumpOptions::new()).unwrap();
        assert_eq!(dumped, json!({"name": "rex", "good": true}));
    }

    #[derive(Reflect, Debug, PartialEq)]
    struct Car {
        color: String,
    }

    #[derive(Reflect, Debug, PartialEq)]
    struct CarOwner {
        car: Car,
        name: String,
    }

    #[test]
    fn nested_objects() {
        let owner = CarOwner { car: Car { color: "Red".into() }, name: "John".into() };
        let expected = json!({"car": {"color": "Red"}, "name": "John"});
        assert_eq!(crate::dump(&owner).unwrap(), expected);

        let loaded: CarOwner = crate::load(&expected).unwrap();
        assert_eq!(loaded.name, "John");
        assert_eq!(loaded.car.color, "Red");
    }

    #[test]
    fn verbose_mixed_lists() {
        let items: Vec<Box<dyn Reflect>> = vec![
            Box::new(Point { x: 4 }),
            Box::new(Dog { name: "rex".into(), good: false }),
        ];
        let options = DumpOptions::new().with_verbose(Verbosity::WITH_CLASS_INFO);
        let dumped = crate::dump_with(&items, &options).unwrap();
        assert_eq!(dumped[1]["-meta"]["classes"]["/"], json!(Dog::type_path()));

        let loaded = crate::load_any(&dumped, &LoadOptions::new()).unwrap();
        let loaded = loaded.take::<Vec<Box<dyn Reflect>>>().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].downcast_ref::<Point>(), Some(&Point { x: 4 }));
        assert_eq!(loaded[1].downcast_ref::<Dog>(), Some(&Dog { name: "rex".into(), good: false }));
    }

    #[test]
    fn null_handling() {
        let err = crate::load::<u8>(&json!(null)).unwrap_err();
        assert_eq!(err.as_deserialization().unwrap().kind(), DeserializationErrorKind::NullNotAllowed);
        assert_eq!(crate::load::<Option<u8>>(&json!(null)).unwrap(), None);

        let strict = LoadOptions::new().with_strict(true);
        assert!(crate::load_any(&json!(null), &strict).is_err());
        assert!(crate::load_any(&json!(null), &LoadOptions::new()).unwrap().is::<()>());
    }
}
