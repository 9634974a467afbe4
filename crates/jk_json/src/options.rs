use std::fmt;
use std::sync::Arc;

use jk_reflect::Reflect;
use jk_utils::hash::HashMap;
use serde_json::Value;

use crate::key_transform::KeyTransformer;
use crate::namespace::Namespace;
use crate::verbosity::Verbosity;

/// A value supplier for a constructor field absent from the input.
pub type AttrGetter = Arc<dyn Fn() -> Box<dyn Reflect> + Send + Sync>;

/// Class names by path (`"/"`, `"/attr"`, `"/attr/sub"`).
pub type MetaHints = HashMap<String, String>;

macro_rules! impl_flag {
    ($field:ident, $with:ident, $doc:literal) => {
        #[doc = $doc]
        #[inline]
        pub fn $with(mut self, $field: bool) -> Self {
            self.$field = $field;
            self
        }

        #[inline]
        pub fn $field(&self) -> bool {
            self.$field
        }
    };
}

// -----------------------------------------------------------------------------
// DumpOptions

/// Options of one dump call, passed down to every converter.
///
/// ```
/// use jk_json::{DumpOptions, Verbosity, key_transform::camelcase};
///
/// let options = DumpOptions::new()
///     .with_strip_nulls(true)
///     .with_key_transformer(camelcase)
///     .with_verbose(Verbosity::WITH_CLASS_INFO);
/// assert!(options.strip_nulls());
/// assert!(!options.strict());
/// ```
#[derive(Clone)]
pub struct DumpOptions {
    namespace: Namespace,
    strict: bool,
    key_transformer: Option<KeyTransformer>,
    strip_nulls: bool,
    strip_privates: bool,
    strip_properties: bool,
    strip_class_variables: bool,
    strip_attr: Vec<String>,
    verbose: Verbosity,
    use_enum_name: bool,
    strip_microseconds: bool,
    tasks: usize,
    custom: HashMap<String, Value>,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            namespace: Namespace::global().clone(),
            strict: false,
            key_transformer: None,
            strip_nulls: false,
            strip_privates: false,
            strip_properties: false,
            strip_class_variables: false,
            strip_attr: Vec::new(),
            verbose: Verbosity::WITH_NOTHING,
            use_enum_name: true,
            strip_microseconds: false,
            tasks: 1,
            custom: HashMap::default(),
        }
    }
}

impl DumpOptions {
    /// Default options on the global namespace.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    #[inline]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    impl_flag!(strict, with_strict, "Dump only declared fields, and fail on attributes that cannot be dumped.");
    impl_flag!(strip_nulls, with_strip_nulls, "Omit attributes and map entries whose value dumps to `null`.");
    impl_flag!(strip_privates, with_strip_privates, "Omit fields whose name starts with `_`.");
    impl_flag!(strip_properties, with_strip_properties, "Omit computed properties.");
    impl_flag!(strip_class_variables, with_strip_class_variables, "Omit class-level attributes.");
    impl_flag!(use_enum_name, with_use_enum_name, "Dump enums by variant name (default) or by value.");
    impl_flag!(strip_microseconds, with_strip_microseconds, "Never write a fraction of seconds.");

    /// Applies `transformer` to every attribute and string map key.
    #[inline]
    pub fn with_key_transformer(mut self, transformer: KeyTransformer) -> Self {
        self.key_transformer = Some(transformer);
        self
    }

    #[inline]
    pub fn key_transformer(&self) -> Option<KeyTransformer> {
        self.key_transformer
    }

    /// Omits the named attributes.
    pub fn with_strip_attr<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip_attr.extend(names.into_iter().map(Into::into));
        self
    }

    #[inline]
    pub fn strip_attr(&self) -> &[String] {
        &self.strip_attr
    }

    /// Accepts a [`Verbosity`] or a `bool` (`true` is everything).
    #[inline]
    pub fn with_verbose(mut self, verbose: impl Into<Verbosity>) -> Self {
        self.verbose = verbose.into();
        self
    }

    #[inline]
    pub fn verbose(&self) -> Verbosity {
        self.verbose
    }

    /// Dumps sequences on `tasks` threads (needs the `parallel` feature).
    #[inline]
    pub fn with_tasks(mut self, tasks: usize) -> Self {
        self.tasks = tasks.max(1);
        self
    }

    #[inline]
    pub fn tasks(&self) -> usize {
        self.tasks
    }

    /// Adds a free-form option for user converters.
    #[inline]
    pub fn with_custom(mut self, key: impl Into<String>, value: Value) -> Self {
        self.custom.insert(key.into(), value);
        self
    }

    #[inline]
    pub fn custom(&self, key: &str) -> Option<&Value> {
        self.custom.get(key)
    }
}

impl fmt::Debug for DumpOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DumpOptions")
            .field("namespace", &self.namespace.name())
            .field("strict", &self.strict)
            .field("strip_nulls", &self.strip_nulls)
            .field("strip_privates", &self.strip_privates)
            .field("strip_properties", &self.strip_properties)
            .field("strip_class_variables", &self.strip_class_variables)
            .field("strip_attr", &self.strip_attr)
            .field("verbose", &self.verbose)
            .field("use_enum_name", &self.use_enum_name)
            .field("strip_microseconds", &self.strip_microseconds)
            .field("tasks", &self.tasks)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// LoadOptions

/// Options of one load call, passed down to every converter.
///
/// ```
/// use jk_json::LoadOptions;
///
/// let options = LoadOptions::new()
///     .with_strict(true)
///     .with_attr_getter("id", || 7_u32);
/// assert!(options.strict());
/// assert!(options.attr_getters().contains_key("id"));
/// ```
#[derive(Clone)]
pub struct LoadOptions {
    namespace: Namespace,
    strict: bool,
    key_transformer: Option<KeyTransformer>,
    attr_getters: HashMap<String, AttrGetter>,
    meta_hints: Option<Arc<MetaHints>>,
    use_enum_name: Option<bool>,
    tasks: usize,
    custom: HashMap<String, Value>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            namespace: Namespace::global().clone(),
            strict: false,
            key_transformer: None,
            attr_getters: HashMap::default(),
            meta_hints: None,
            use_enum_name: None,
            tasks: 1,
            custom: HashMap::default(),
        }
    }
}

impl LoadOptions {
    /// Default options on the global namespace.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    #[inline]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    impl_flag!(
        strict,
        with_strict,
        "Reject unexpected keys, `null` for open targets and lossy primitive conversions."
    );

    /// Applies `transformer` to every input key before matching fields.
    #[inline]
    pub fn with_key_transformer(mut self, transformer: KeyTransformer) -> Self {
        self.key_transformer = Some(transformer);
        self
    }

    #[inline]
    pub fn key_transformer(&self) -> Option<KeyTransformer> {
        self.key_transformer
    }

    /// Supplies the field `name` of the outermost object when the input
    /// lacks it.
    ///
    /// A getter for a name that is not a constructor field is assigned after
    /// construction, into the field or the extra attributes.
    pub fn with_attr_getter<T, F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        T: Reflect,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let getter: AttrGetter = Arc::new(move || -> Box<dyn Reflect> { Box::new(getter()) });
        self.attr_getters.insert(name.into(), getter);
        self
    }

    #[inline]
    pub fn attr_getters(&self) -> &HashMap<String, AttrGetter> {
        &self.attr_getters
    }

    /// Class names by path, used where the input carries no metadata.
    #[inline]
    pub fn with_meta_hints(mut self, hints: MetaHints) -> Self {
        self.meta_hints = Some(Arc::new(hints));
        self
    }

    #[inline]
    pub fn meta_hints(&self) -> Option<&Arc<MetaHints>> {
        self.meta_hints.as_ref()
    }

    /// `Some(true)` matches enums by name, `Some(false)` by value, `None`
    /// tries the name, then the value.
    #[inline]
    pub fn with_use_enum_name(mut self, use_enum_name: Option<bool>) -> Self {
        self.use_enum_name = use_enum_name;
        self
    }

    #[inline]
    pub fn use_enum_name(&self) -> Option<bool> {
        self.use_enum_name
    }

    /// Loads sequences on `tasks` threads (needs the `parallel` feature).
    #[inline]
    pub fn with_tasks(mut self, tasks: usize) -> Self {
        self.tasks = tasks.max(1);
        self
    }

    #[inline]
    pub fn tasks(&self) -> usize {
        self.tasks
    }

    /// Adds a free-form option for user converters.
    #[inline]
    pub fn with_custom(mut self, key: impl Into<String>, value: Value) -> Self {
        self.custom.insert(key.into(), value);
        self
    }

    #[inline]
    pub fn custom(&self, key: &str) -> Option<&Value> {
        self.custom.get(key)
    }
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("namespace", &self.namespace.name())
            .field("strict", &self.strict)
            .field("attr_getters", &self.attr_getters.keys().collect::<Vec<_>>())
            .field("meta_hints", &self.meta_hints)
            .field("use_enum_name", &self.use_enum_name)
            .field("tasks", &self.tasks)
            .finish_non_exhaustive()
    }
}
