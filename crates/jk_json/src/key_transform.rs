//! Key transformers for [`DumpOptions::with_key_transformer`] and
//! [`LoadOptions::with_key_transformer`].
//!
//! ```
//! use jk_json::key_transform::{camelcase, lispcase, pascalcase, snakecase};
//!
//! assert_eq!(camelcase("some_attr-name"), "someAttrName");
//! assert_eq!(snakecase("someAttrName"), "some_attr_name");
//! assert_eq!(pascalcase("some_attr"), "SomeAttr");
//! assert_eq!(lispcase("someAttr"), "some-attr");
//! ```
//!
//! [`DumpOptions::with_key_transformer`]: crate::DumpOptions::with_key_transformer
//! [`LoadOptions::with_key_transformer`]: crate::LoadOptions::with_key_transformer

/// A function applied to every attribute and map key.
pub type KeyTransformer = fn(&str) -> String;

/// `some_attr` to `someAttr`. Dashes count as underscores.
pub fn camelcase(name: &str) -> String {
    let name = name.replace('-', "_");
    let mut parts = name.split('_').filter(|part| !part.is_empty());
    let mut result = String::with_capacity(name.len());
    if let Some(first) = parts.next() {
        lower_first(first, &mut result);
    }
    for part in parts {
        upper_first(part, &mut result);
    }
    result
}

/// `someAttr` to `some_attr`. Dashes count as underscores.
pub fn snakecase(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    let mut previous_lower = false;
    for (index, c) in name.chars().enumerate() {
        if c == '-' || c == '_' {
            result.push('_');
            previous_lower = false;
            continue;
        }
        if index > 0 && c.is_uppercase() && previous_lower {
            result.push('_');
        }
        previous_lower = index == 0 || c.is_lowercase();
        result.extend(c.to_lowercase());
    }
    result
}

/// `some_attr` to `SomeAttr`.
pub fn pascalcase(name: &str) -> String {
    let camel = camelcase(name);
    let mut result = String::with_capacity(camel.len());
    upper_first(&camel, &mut result);
    result
}

/// `someAttr` to `some-attr`.
pub fn lispcase(name: &str) -> String {
    snakecase(name).replace('_', "-")
}

fn lower_first(part: &str, out: &mut String) {
    let mut chars = part.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_lowercase());
        out.push_str(chars.as_str());
    }
}

fn upper_first(part: &str, out: &mut String) {
    let mut chars = part.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::{camelcase, lispcase, pascalcase, snakecase};

    #[test]
    fn round_trips_between_styles() {
        for name in ["car_color", "owner_name_first", "x"] {
            assert_eq!(snakecase(&camelcase(name)), name);
            assert_eq!(snakecase(&pascalcase(name)), name);
        }
        assert_eq!(lispcase("CarColor"), "car-color");
        assert_eq!(camelcase("Car_color"), "carColor");
        assert_eq!(snakecase("CarColor"), "car_color");
    }
}
