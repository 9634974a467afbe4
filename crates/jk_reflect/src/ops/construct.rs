use std::borrow::Cow;

use jk_utils::hash::HashMap;

use crate::Reflect;
use crate::info::TypePath;
use crate::ops::ConstructError;

/// Loaded field values, consumed by a struct [`Constructor`].
///
/// [`Constructor`]: crate::info::Constructor
///
/// ```
/// use jk_reflect::{derive::Reflect, info::Typed, ops::FieldValues};
///
/// #[derive(Reflect, Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let info = Point::type_info().as_struct().unwrap();
///
/// let mut values = FieldValues::new();
/// values.insert("x", Box::new(1_i32));
/// values.insert("y", Box::new(2_i32));
/// let point = info.construct(&mut values).unwrap();
/// assert_eq!(point.take::<Point>().unwrap(), Point { x: 1, y: 2 });
///
/// let mut values = FieldValues::new();
/// values.insert("x", Box::new(1_i32));
/// assert!(info.construct(&mut values).is_err());
/// ```
#[derive(Default, Debug)]
pub struct FieldValues {
    values: HashMap<String, Box<dyn Reflect>>,
}

impl FieldValues {
    /// Creates an empty set of values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of a field, returning the previous one.
    #[inline]
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: Box<dyn Reflect>,
    ) -> Option<Box<dyn Reflect>> {
        self.values.insert(name.into(), value)
    }

    /// Returns `true` if a value for `name` is present.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no values are left.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Removes the value of `name`, whatever its type.
    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Reflect>> {
        self.values.remove(name)
    }

    /// Takes the value of a required field.
    pub fn take<T: Reflect + TypePath>(&mut self, name: &'static str) -> Result<T, ConstructError> {
        match self.values.remove(name) {
            Some(value) => Self::cast(name, value),
            None => Err(ConstructError::MissingField {
                field: Cow::Borrowed(name),
            }),
        }
    }

    /// Takes the value of a field, falling back to `T::default()`.
    pub fn take_or_default<T: Reflect + TypePath + Default>(
        &mut self,
        name: &'static str,
    ) -> Result<T, ConstructError> {
        Ok(self.take_optional(name)?.unwrap_or_default())
    }

    /// Takes the value of a field if present.
    pub fn take_optional<T: Reflect + TypePath>(
        &mut self,
        name: &'static str,
    ) -> Result<Option<T>, ConstructError> {
        self.values
            .remove(name)
            .map(|value| Self::cast(name, value))
            .transpose()
    }

    /// Drains the values nobody took.
    pub fn drain(&mut self) -> impl Iterator<Item = (String, Box<dyn Reflect>)> + '_ {
        self.values.drain()
    }

    fn cast<T: Reflect + TypePath>(
        name: &'static str,
        value: Box<dyn Reflect>,
    ) -> Result<T, ConstructError> {
        T::from_boxed(value).map_err(|value| ConstructError::MismatchedType {
            field: Some(Cow::Borrowed(name)),
            expected: Cow::Borrowed(T::type_path()),
            found: Cow::Borrowed(value.reflect_type_path()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::FieldValues;
    use crate::Reflect;
    use crate::ops::ConstructError;

    #[test]
    fn take_checks_types() {
        let mut values = FieldValues::new();
        values.insert("a", Box::new(1_u8));

        let err = values.take::<String>("a").unwrap_err();
        assert!(matches!(err, ConstructError::MismatchedType { .. }));
        assert!(values.is_empty());
    }

    #[test]
    fn dynamic_fields_accept_anything() {
        let mut values = FieldValues::new();
        values.insert("a", Box::new(1_u8));

        let value = values.take::<Box<dyn Reflect>>("a").unwrap();
        assert!(value.is::<u8>());
        assert_eq!(values.take_or_default::<u32>("b").unwrap(), 0);
        assert_eq!(values.take_optional::<u32>("c").unwrap(), None);
    }
}
