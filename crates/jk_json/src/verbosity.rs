use bitflags::bitflags;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Key of the metadata object written at the root of verbose dumps.
pub const META_KEY: &str = "-meta";

/// Key marking the class of a nested object while a verbose dump runs.
///
/// It never survives in the output: the root collects and strips them.
pub(crate) const CLASS_KEY: &str = "-cls";

bitflags! {
    /// How much metadata a dump writes under [`META_KEY`].
    ///
    /// ```
    /// use jk_json::Verbosity;
    ///
    /// let everything = Verbosity::WITH_CLASS_INFO | Verbosity::WITH_DUMP_TIME;
    /// assert_eq!(everything, Verbosity::WITH_EVERYTHING);
    /// assert!(Verbosity::WITH_NOTHING.is_empty());
    /// ```
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Verbosity: u8 {
        const WITH_NOTHING = 0;
        /// The type of every object, by path from the root.
        const WITH_CLASS_INFO = 1 << 0;
        /// The moment of the dump.
        const WITH_DUMP_TIME = 1 << 1;
        const WITH_EVERYTHING = Self::WITH_CLASS_INFO.bits() | Self::WITH_DUMP_TIME.bits();
    }
}

impl From<bool> for Verbosity {
    /// `true` is [`Verbosity::WITH_EVERYTHING`].
    #[inline]
    fn from(value: bool) -> Self {
        if value {
            Self::WITH_EVERYTHING
        } else {
            Self::WITH_NOTHING
        }
    }
}

/// Adds the metadata object to a finished root object.
///
/// `root_class` is the class name of the root. Nested classes are collected
/// from the `-cls` markers, which are removed on the way.
pub(crate) fn attach_meta(object: &mut Map<String, Value>, root_class: &str, verbose: Verbosity) {
    let mut meta = Map::new();

    if verbose.contains(Verbosity::WITH_CLASS_INFO) {
        let mut classes = Map::new();
        classes.insert(String::from("/"), Value::String(String::from(root_class)));
        collect_classes(object, "/", &mut classes);
        meta.insert(String::from("classes"), Value::Object(classes));
    }

    if verbose.contains(Verbosity::WITH_DUMP_TIME) {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        meta.insert(String::from("dump_time"), Value::String(now));
    }

    object.insert(String::from(META_KEY), Value::Object(meta));
}

fn collect_classes(object: &mut Map<String, Value>, prefix: &str, classes: &mut Map<String, Value>) {
    for (attr, value) in object.iter_mut() {
        if attr == META_KEY {
            continue;
        }
        let Value::Object(child) = value else {
            continue;
        };
        let path = format!("{prefix}{attr}");
        if let Some(class) = child.shift_remove(CLASS_KEY) {
            classes.insert(path.clone(), class);
        }
        collect_classes(child, &format!("{path}/"), classes);
    }
}

/// Reads `classes` from a metadata object: path to class name.
pub(crate) fn read_classes(meta: &Value) -> Vec<(String, String)> {
    meta.get("classes")
        .and_then(Value::as_object)
        .map(|classes| {
            classes
                .iter()
                .filter_map(|(path, class)| Some((path.clone(), class.as_str()?.to_owned())))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{META_KEY, Verbosity, attach_meta, read_classes};

    #[test]
    fn classes_are_collected_by_path() {
        let mut root = json!({
            "car": {"-cls": "app::Car", "color": "red", "owner": {"-cls": "app::Person", "name": "x"}},
            "id": 4,
        });
        let object = root.as_object_mut().unwrap();
        attach_meta(object, "app::Owner", Verbosity::WITH_CLASS_INFO);

        assert_eq!(
            root,
            json!({
                "car": {"color": "red", "owner": {"name": "x"}},
                "id": 4,
                "-meta": {"classes": {
                    "/": "app::Owner",
                    "/car": "app::Car",
                    "/car/owner": "app::Person",
                }},
            })
        );

        let classes = read_classes(&root[META_KEY]);
        assert_eq!(classes.len(), 3);
        assert!(classes.contains(&("/car/owner".into(), "app::Person".into())));
    }

    #[test]
    fn dump_time_only() {
        let mut root = json!({});
        attach_meta(root.as_object_mut().unwrap(), "app::Owner", Verbosity::WITH_DUMP_TIME);
        let meta = root[META_KEY].as_object().unwrap();
        assert!(meta.get("classes").is_none());
        assert!(meta["dump_time"].as_str().unwrap().ends_with('Z'));
    }
}
