use std::collections::BTreeMap;

use crate::Reflect;

/// Attributes a struct accepted without declaring them.
///
/// A struct opts in with a field of this type marked `#[reflect(extra)]`.
/// Loaders put unmatched input attributes there; dumpers write them back
/// next to the declared fields.
pub type ExtraFields = BTreeMap<String, Box<dyn Reflect>>;

/// A trait for named structs.
///
/// ```
/// use jk_reflect::{derive::Reflect, ops::Struct};
///
/// #[derive(Reflect)]
/// struct Foo {
///     a: i32,
/// }
///
/// let mut foo = Foo { a: 1 };
/// assert!(foo.field("a").is_some());
/// assert!(foo.field("b").is_none());
///
/// *foo.field_mut("a").unwrap().downcast_mut::<i32>().unwrap() = 42;
/// assert_eq!(foo.a, 42);
/// ```
pub trait Struct: Reflect {
    /// Returns the value of the field named `name`.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the value of the field named `name`, mutably.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns the undeclared attributes, for structs with an extras slot.
    #[inline]
    fn extras(&self) -> Option<&ExtraFields> {
        None
    }

    /// Returns the undeclared attributes mutably, for structs with an extras slot.
    #[inline]
    fn extras_mut(&mut self) -> Option<&mut ExtraFields> {
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::derive::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::{ExtraFields, FieldValues, Struct};

    fn default_level() -> u8 {
        3
    }

    #[derive(Reflect, Debug, Default)]
    #[reflect(property = "shout", class_attr = "SPECIES")]
    struct Dog {
        name: String,
        #[reflect(default = "default_level")]
        level: u8,
        #[reflect(skip)]
        cache: Vec<u8>,
        #[reflect(extra)]
        extra: ExtraFields,
    }

    impl Dog {
        const SPECIES: &'static str = "canis";

        fn shout(&self) -> String {
            self.name.to_uppercase()
        }
    }

    #[derive(Reflect)]
    #[reflect(type_path = "zoo::Crate")]
    struct Boxed<T> {
        item: T,
    }

    #[test]
    fn struct_info_lists_visible_fields() {
        let info = Dog::type_info().as_struct().unwrap();
        let names: Vec<_> = info.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["name", "level", "extra"]);
        assert_eq!(info.variadic_field().unwrap().name(), "extra");
        assert!(info.field("level").unwrap().has_default());
        assert!(info.field("cache").is_none());
    }

    #[test]
    fn construct_fills_defaults_and_extras() {
        let info = Dog::type_info().as_struct().unwrap();
        let mut values = FieldValues::new();
        values.insert("name", Box::new(String::from("rex")));

        let dog = info.construct(&mut values).unwrap().take::<Dog>().unwrap();
        assert_eq!(dog.name, "rex");
        assert_eq!(dog.level, 3);
        assert!(dog.cache.is_empty());
        assert!(dog.extra.is_empty());
    }

    #[test]
    fn properties_and_class_attrs() {
        let info = Dog::type_info().as_struct().unwrap();
        let dog = Dog {
            name: "rex".into(),
            ..Default::default()
        };

        let shout = info.properties()[0].get(&dog).unwrap();
        assert_eq!(shout.downcast_ref::<String>().unwrap(), "REX");
        assert!(info.properties()[0].get(&1_u8).is_none());

        let species = info.class_attrs()[0].value();
        assert_eq!(info.class_attrs()[0].name(), "SPECIES");
        assert_eq!(*species.downcast_ref::<&str>().unwrap(), "canis");
    }

    #[test]
    fn extras_are_exposed() {
        let mut dog = Dog::default();
        dog.extras_mut()
            .unwrap()
            .insert("color".into(), Box::new(String::from("brown")));
        assert_eq!(dog.extras().unwrap().len(), 1);
        assert!(dog.field("extra").is_some());
        assert!(dog.as_struct_mut().is_some());
    }

    #[test]
    fn generic_paths() {
        assert_eq!(<Boxed<u8>>::type_path(), "zoo::Crate<u8>");
        assert_eq!(<Boxed<u8>>::type_name(), "Crate<u8>");
        assert_eq!(<Boxed<u8>>::type_ident(), "Crate");
        assert_eq!(<Boxed<u8>>::module_path(), Some("zoo"));
        assert!(Dog::type_path().ends_with("::Dog"));

        let value = Boxed { item: 1_u8 };
        assert!(value.field("item").unwrap().is::<u8>());
    }
}
