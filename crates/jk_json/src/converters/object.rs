//! Structs: dumped as JSON objects of their attributes, loaded through their
//! constructor.

use std::borrow::Cow;

use jk_reflect::Reflect;
use jk_reflect::info::{NamedField, TypeInfo};
use jk_reflect::ops::{FieldValues, ReflectRef};
use jk_utils::hash::HashMap;
use serde_json::{Map, Value};

use crate::context::{DumpContext, LoadContext};
use crate::converters::{construct_failed, invalid_shape};
use crate::error::{DeserializationError, DeserializationErrorKind, Error, SerializationError, SerializationErrorKind};
use crate::name::short_name;
use crate::verbosity::{CLASS_KEY, META_KEY, Verbosity, attach_meta};

/// Warning code of attributes left out of a non-strict dump.
pub const ATTRIBUTE_NOT_SERIALIZED: &str = "attribute-not-serialized";

// -----------------------------------------------------------------------------
// Dump

enum Attribute<'v> {
    Borrowed(&'v dyn Reflect),
    Owned(Box<dyn Reflect>),
}

impl Attribute<'_> {
    fn get(&self) -> &dyn Reflect {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => value.as_reflect(),
        }
    }
}

/// Dumps a struct as an object of its attributes.
///
/// The attributes are, in order: the fields, the computed properties, the
/// class attributes and, unless strict, the extra attributes. Options strip
/// any of these groups, private fields (leading `_`) and named attributes.
/// Internal fields (leading `__`) are never dumped.
///
/// With `cls` another struct than the value's own type, only the attributes
/// `cls` declares are dumped.
///
/// An attribute that fails to dump is an error in strict mode; otherwise it
/// is left out with an [`ATTRIBUTE_NOT_SERIALIZED`] warning.
pub fn dump_object(value: &dyn Reflect, cls: &'static TypeInfo, ctx: &mut DumpContext<'_>) -> Result<Value, Error> {
    let Some(info) = cls.as_struct() else {
        return Err(Error::custom("the object serializer only handles structs"));
    };
    let ReflectRef::Struct(view) = value.reflect_ref() else {
        return Err(Error::custom("the value is not a struct"));
    };
    let runtime = value.reflect_type_info().as_struct();
    let options = ctx.options();
    let namespace = ctx.namespace();

    let is_root = !ctx.store_cls();
    let store_children = options.verbose().contains(Verbosity::WITH_CLASS_INFO);

    let mut attributes: Vec<(&str, Attribute<'_>)> = Vec::new();

    for field in info.fields() {
        if field.is_variadic() || field.is_internal() || (options.strip_privates() && field.is_private()) {
            continue;
        }
        if let Some(field_value) = view.field(field.name()) {
            attributes.push((field.name(), Attribute::Borrowed(field_value)));
        }
    }

    if !options.strip_properties() {
        for property in info.properties() {
            let own = runtime
                .and_then(|runtime| runtime.properties().iter().find(|p| p.name() == property.name()))
                .unwrap_or(property);
            if let Some(computed) = own.get(value) {
                attributes.push((property.name(), Attribute::Owned(computed)));
            }
        }
    }

    if !options.strip_class_variables() {
        for class_attr in info.class_attrs() {
            attributes.push((class_attr.name(), Attribute::Owned(class_attr.value())));
        }
    }

    if !options.strict()
        && info.variadic_field().is_some()
        && let Some(extras) = view.extras()
    {
        for (name, extra) in extras {
            attributes.push((name.as_str(), Attribute::Borrowed(extra.as_reflect())));
        }
    }

    let mut object = Map::with_capacity(attributes.len());
    for (name, attribute) in attributes {
        if options.strip_attr().iter().any(|stripped| stripped == name) {
            continue;
        }

        let attribute = attribute.get();
        let dumped = ctx.with_store_cls(store_children, |ctx| ctx.dump(attribute));
        let mut dumped = match dumped {
            Ok(dumped) => dumped,
            Err(err) => {
                let message = format!(
                    "Failed to dump attribute \"{name}\" of object of type \"{}\". Reason: {err}",
                    short_name(cls)
                );
                if options.strict() {
                    return Err(SerializationError::new(SerializationErrorKind::Attribute, message, Some(cls))
                        .with_attribute(name)
                        .with_cause(err)
                        .into());
                }
                namespace.warn(&format!("{message}. Ignoring the attribute."), ATTRIBUTE_NOT_SERIALIZED);
                continue;
            }
        };

        if options.strip_nulls() && dumped.is_null() {
            continue;
        }
        if store_children && let Value::Object(child) = &mut dumped {
            let class = namespace.class_name(class_of(attribute));
            child.insert(String::from(CLASS_KEY), Value::String(class));
        }

        let key = match options.key_transformer() {
            Some(transformer) => transformer(name),
            None => String::from(name),
        };
        object.insert(key, dumped);
    }

    if is_root && !options.verbose().is_empty() {
        attach_meta(&mut object, &namespace.class_name(cls), options.verbose());
    }
    Ok(Value::Object(object))
}

/// The type recorded for a value in metadata: the content of unions and
/// pointers, which dump as their content.
pub(crate) fn class_of(value: &dyn Reflect) -> &'static TypeInfo {
    match value.reflect_ref() {
        ReflectRef::Union(union) => match union.member() {
            Some(member) => class_of(member),
            None => value.reflect_type_info(),
        },
        ReflectRef::Pointer(Some(pointee)) => class_of(pointee),
        _ => value.reflect_type_info(),
    }
}

// -----------------------------------------------------------------------------
// Load

/// Builds a struct from an object.
///
/// Every constructor field takes, in order of preference: the input key of
/// the same name, an attribute getter, its declared default, "no value" if
/// its type accepts one. Otherwise the load fails.
///
/// Keys matching no field are an error in strict mode. Otherwise they are
/// loaded as open values into the extra attributes, if the struct has them,
/// and dropped if not.
pub fn load_object(json: &Value, cls: &'static TypeInfo, ctx: &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error> {
    let Some(info) = cls.as_struct() else {
        return Err(Error::custom("the object deserializer only handles structs"));
    };
    let Value::Object(input) = json else {
        return Err(invalid_shape(json, cls, "an object"));
    };

    // Metadata paths follow the keys as written in the input.
    let mut written: HashMap<String, &str> = HashMap::default();
    let input: Cow<'_, Map<String, Value>> = match ctx.options().key_transformer() {
        Some(transformer) => Cow::Owned(
            input
                .iter()
                .map(|(key, value)| {
                    if key == META_KEY {
                        return (key.clone(), value.clone());
                    }
                    let name = transformer(key);
                    written.insert(name.clone(), key.as_str());
                    (name, value.clone())
                })
                .collect(),
        ),
        None => Cow::Borrowed(input),
    };
    let written_as = |name: &str| -> String { String::from(written.get(name).copied().unwrap_or(name)) };

    let getters = ctx.take_attr_getters();
    let mut used_getters: Vec<&str> = Vec::new();
    let mut values = FieldValues::new();

    for field in info.fields().iter().filter(|field| !field.is_variadic()) {
        let name = field.name();
        if let Some(field_json) = input.get(name) {
            let loaded = ctx.load_attribute(field_json, Some(field.type_info()), &written_as(name))?;
            values.insert(name, loaded);
        } else if let Some(getter) = getters.and_then(|getters| getters.get(name)) {
            values.insert(name, getter());
            used_getters.push(name);
        } else if field.has_default() {
            // The constructor fills it in.
        } else if field.type_info().is_dynamic() {
            // An open field takes "no value" even in strict mode.
            values.insert(name, Box::new(()));
        } else if field.type_info().accepts_none() {
            let none = ctx.load_attribute(&Value::Null, Some(field.type_info()), name)?;
            values.insert(name, none);
        } else {
            return Err(DeserializationError::new(
                DeserializationErrorKind::UnfulfilledArgument,
                format!("No value found for \"{name}\" of \"{}\".", short_name(cls)),
                json,
                Some(cls),
            )
            .with_attribute(name)
            .into());
        }
    }

    let remaining: Vec<(&String, &Value)> = input
        .iter()
        .filter(|(key, _)| key.as_str() != META_KEY && info.field(key).is_none_or(NamedField::is_variadic))
        .collect();

    if ctx.strict()
        && let Some((key, _)) = remaining.first()
    {
        return Err(DeserializationError::new(
            DeserializationErrorKind::SignatureMismatch,
            format!("Type \"{}\" does not expect \"{key}\".", short_name(cls)),
            json,
            Some(cls),
        )
        .with_attribute(key.as_str())
        .into());
    }

    let mut instance = info
        .construct(&mut values)
        .map_err(|err| construct_failed(json, cls, err))?;

    if info.variadic_field().is_some() && !remaining.is_empty() {
        let mut extras = Vec::with_capacity(remaining.len());
        for (key, value) in remaining {
            extras.push((key.clone(), ctx.load_attribute(value, None, &written_as(key))?));
        }
        if let Some(slot) = instance.as_struct_mut().and_then(|s| s.extras_mut()) {
            slot.extend(extras);
        }
    } else if !remaining.is_empty() {
        log::trace!(
            "dropped {} attribute(s) unknown to `{}`",
            remaining.len(),
            cls.type_path()
        );
    }

    if let Some(getters) = getters {
        let leftovers = getters
            .iter()
            .filter(|(name, _)| !used_getters.contains(&name.as_str()) && !input.contains_key(name.as_str()));
        for (name, getter) in leftovers {
            if info.field(name).is_some_and(|field| !field.is_variadic()) {
                continue;
            }
            let Some(target) = instance.as_struct_mut() else {
                break;
            };
            if let Some(slot) = target.field_mut(name) {
                slot.set(getter()).map_err(|_| {
                    Error::custom(format_args!("the attribute getter of \"{name}\" returned a value of another type"))
                })?;
            } else if let Some(extras) = target.extras_mut() {
                extras.insert(name.clone(), getter());
            }
        }
    }

    Ok(instance)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, OnceLock};

    use jk_reflect::Reflect;
    use jk_reflect::derive::Reflect;
    use jk_reflect::info::TypeInfo;
    use jk_reflect::ops::ExtraFields;
    use serde_json::{Value, json};

    use crate::key_transform::{camelcase, snakecase};
    use crate::{DeserializationErrorKind, DumpContext, DumpOptions, Error, LoadOptions, SerializationErrorKind};
    use crate::{META_KEY, TypeDescriptor, Verbosity, dump_with, load, load_with};

    #[derive(Reflect, Debug, Default)]
    #[reflect(property = "shout", class_attr = "SPECIES")]
    struct Dog {
        name: String,
        #[reflect(default)]
        level: u8,
        _secret: u8,
        #[reflect(extra)]
        extra: ExtraFields,
    }

    impl Dog {
        const SPECIES: &'static str = "canis";

        fn shout(&self) -> String {
            self.name.to_uppercase()
        }
    }

    fn rex() -> Dog {
        let mut dog = Dog {
            name: "rex".into(),
            level: 2,
            _secret: 7,
            ..Default::default()
        };
        dog.extra.insert("color".into(), Box::new(String::from("brown")));
        dog
    }

    #[derive(Reflect, Debug, PartialEq)]
    struct Point {
        x: i32,
    }

    #[test]
    fn dumps_every_attribute_group() {
        assert_eq!(
            crate::dump(&rex()).unwrap(),
            json!({
                "name": "rex",
                "level": 2,
                "_secret": 7,
                "shout": "REX",
                "SPECIES": "canis",
                "color": "brown",
            })
        );
    }

    #[test]
    fn strip_options() {
        let options = DumpOptions::new()
            .with_strip_privates(true)
            .with_strip_properties(true)
            .with_strip_class_variables(true)
            .with_strip_attr(["level"]);
        assert_eq!(dump_with(&rex(), &options).unwrap(), json!({"name": "rex", "color": "brown"}));

        // Strict dumps leave the extra attributes out.
        let strict = DumpOptions::new().with_strict(true).with_strip_properties(true);
        assert_eq!(
            dump_with(&rex(), &strict).unwrap(),
            json!({"name": "rex", "level": 2, "_secret": 7, "SPECIES": "canis"})
        );
    }

    #[test]
    fn strip_nulls() {
        #[derive(Reflect)]
        struct Car {
            color: String,
            owner: Option<String>,
        }

        let car = Car { color: "red".into(), owner: None };
        let options = DumpOptions::new().with_strip_nulls(true);
        assert_eq!(dump_with(&car, &options).unwrap(), json!({"color": "red"}));
    }

    #[test]
    fn load_fills_defaults_and_extras() {
        let dog: Dog = load(&json!({"name": "rex", "_secret": 1, "color": "brown"})).unwrap();
        assert_eq!(dog.name, "rex");
        assert_eq!(dog.level, 0);
        assert_eq!(dog._secret, 1);
        assert_eq!(dog.extra["color"].downcast_ref::<String>().unwrap(), "brown");
    }

    #[test]
    fn missing_argument() {
        let err = load::<Dog>(&json!({"_secret": 1})).unwrap_err();
        let err = err.as_deserialization().unwrap();
        assert_eq!(err.kind(), DeserializationErrorKind::UnfulfilledArgument);
        assert_eq!(err.attribute(), Some("name"));
    }

    #[test]
    fn unexpected_keys() {
        let input = json!({"x": 1, "y": 2});
        assert_eq!(load::<Point>(&input).unwrap(), Point { x: 1 });

        let err = load_with::<Point>(&input, &LoadOptions::new().with_strict(true)).unwrap_err();
        let err = err.as_deserialization().unwrap();
        assert_eq!(err.kind(), DeserializationErrorKind::SignatureMismatch);
        assert_eq!(err.attribute(), Some("y"));
        assert_eq!(err.message(), "Type \"Point\" does not expect \"y\".");
    }

    #[test]
    fn attribute_getters() {
        let options = LoadOptions::new()
            .with_attr_getter("name", || String::from("rex"))
            .with_attr_getter("color", || String::from("brown"));
        let dog: Dog = load_with(&json!({"_secret": 3}), &options).unwrap();
        assert_eq!(dog.name, "rex");
        assert_eq!(dog.extra["color"].downcast_ref::<String>().unwrap(), "brown");

        // The input wins over the getter.
        let dog: Dog = load_with(&json!({"name": "max", "_secret": 3}), &options).unwrap();
        assert_eq!(dog.name, "max");
    }

    #[test]
    fn key_transformers() {
        #[derive(Reflect, Debug, PartialEq)]
        struct Person {
            first_name: String,
            last_name: String,
        }

        let person = Person { first_name: "Ada".into(), last_name: "Lovelace".into() };
        let dumped = dump_with(&person, &DumpOptions::new().with_key_transformer(camelcase)).unwrap();
        assert_eq!(dumped, json!({"firstName": "Ada", "lastName": "Lovelace"}));

        let loaded: Person = load_with(&dumped, &LoadOptions::new().with_key_transformer(snakecase)).unwrap();
        assert_eq!(loaded, person);
    }

    #[derive(Reflect)]
    struct Animal {
        name: String,
    }

    #[derive(Reflect)]
    #[reflect(extends(Animal))]
    struct Cat {
        name: String,
        lives: u8,
    }

    fn dump_animal(_: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error> {
        Ok(json!("an animal"))
    }

    #[test]
    fn subtypes_use_the_base_serializer() {
        let namespace = crate::fork(Some("animals"));
        namespace.register_serializer(dump_animal, [TypeDescriptor::of::<Animal>()], true);

        let cat = Cat { name: "tom".into(), lives: 9 };
        let options = DumpOptions::new().with_namespace(namespace);
        assert_eq!(dump_with(&cat, &options).unwrap(), json!("an animal"));
        assert_eq!(crate::dump(&cat).unwrap(), json!({"name": "tom", "lives": 9}));
    }

    #[derive(Reflect)]
    struct Sealed(u8);

    #[derive(Reflect)]
    struct Vault {
        label: String,
        sealed: Sealed,
    }

    fn refuse(_: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error> {
        Err(Error::custom("sealed"))
    }

    #[test]
    fn failing_attributes() {
        let namespace = crate::fork(Some("vault"));
        namespace.register_serializer(refuse, [TypeDescriptor::of::<Sealed>()], true);
        let vault = Vault { label: "v".into(), sealed: Sealed(1) };

        let options = DumpOptions::new().with_namespace(namespace.clone());
        assert_eq!(dump_with(&vault, &options).unwrap(), json!({"label": "v"}));

        let strict = options.with_strict(true);
        let err = dump_with(&vault, &strict).unwrap_err();
        let err = err.as_serialization().unwrap();
        assert_eq!(err.kind(), SerializationErrorKind::Attribute);
        assert_eq!(err.attribute(), Some("sealed"));
        let cause = err.cause().and_then(Error::as_serialization).unwrap();
        assert_eq!(cause.kind(), SerializationErrorKind::Converter);
    }

    #[derive(Reflect)]
    struct Node {
        name: String,
        next: Box<dyn Reflect>,
    }

    #[test]
    fn cycles() {
        let head: Arc<OnceLock<Node>> = Arc::new(OnceLock::new());
        let node = Node { name: "a".into(), next: Box::new(Arc::clone(&head)) };
        assert!(OnceLock::set(&head, node).is_ok());

        assert_eq!(crate::dump(&head).unwrap(), json!({"name": "a"}));

        let err = dump_with(&head, &DumpOptions::new().with_strict(true)).unwrap_err();
        let err = err.as_serialization().unwrap();
        assert_eq!(err.kind(), SerializationErrorKind::Attribute);
        assert_eq!(err.attribute(), Some("next"));
        let cause = err.cause().and_then(Error::as_serialization).unwrap();
        assert_eq!(cause.kind(), SerializationErrorKind::RecursionDetected);
    }

    #[derive(Reflect)]
    #[reflect(extends(Animal))]
    struct Lion {
        name: String,
        mane: bool,
    }

    fn dump_cat(_: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error> {
        Ok(json!("a cat"))
    }

    #[test]
    fn subtypes_prefer_their_own_serializer() {
        let animal_first = crate::fork(Some("animal-first"));
        animal_first.register_serializer(dump_animal, [TypeDescriptor::of::<Animal>()], true);
        animal_first.register_serializer(dump_cat, [TypeDescriptor::of::<Cat>()], true);

        let cat_first = crate::fork(Some("cat-first"));
        cat_first.register_serializer(dump_cat, [TypeDescriptor::of::<Cat>()], true);
        cat_first.register_serializer(dump_animal, [TypeDescriptor::of::<Animal>()], true);

        let cat = Cat { name: "tom".into(), lives: 9 };
        let lion = Lion { name: "leo".into(), mane: true };
        for namespace in [animal_first, cat_first] {
            let options = DumpOptions::new().with_namespace(namespace);
            assert_eq!(dump_with(&cat, &options).unwrap(), json!("a cat"));
            assert_eq!(dump_with(&lion, &options).unwrap(), json!("an animal"));
        }
    }

    #[test]
    fn metadata_keys_are_not_transformed() {
        #[derive(Reflect, Debug, PartialEq)]
        struct Person {
            first_name: String,
        }

        let person = Person { first_name: "Ada".into() };
        let options = DumpOptions::new()
            .with_key_transformer(camelcase)
            .with_verbose(Verbosity::WITH_CLASS_INFO);
        let dumped = dump_with(&person, &options).unwrap();
        assert_eq!(dumped["firstName"], json!("Ada"));
        assert!(dumped.get(META_KEY).is_some());

        let options = LoadOptions::new().with_key_transformer(snakecase).with_strict(true);
        let loaded: Person = load_with(&dumped, &options).unwrap();
        assert_eq!(loaded, person);
    }

    #[derive(Reflect)]
    struct Holder {
        name: String,
        payload: Box<dyn Reflect>,
    }

    #[test]
    fn missing_open_fields_are_empty() {
        let strict = LoadOptions::new().with_strict(true);
        let holder: Holder = load_with(&json!({"name": "x"}), &strict).unwrap();
        assert_eq!(holder.name, "x");
        assert!(holder.payload.is::<()>());

        let holder: Holder = load(&json!({"name": "y", "payload": 3})).unwrap();
        assert_eq!(holder.payload.downcast_ref::<i64>(), Some(&3));
    }
}
