use std::mem;
use std::sync::Arc;

use jk_reflect::info::TypeInfo;
use jk_reflect::{Identity, Reflect};
use jk_utils::hash::{HashMap, HashSet};
use serde_json::Value;

use crate::error::Error;
use crate::namespace::Namespace;
use crate::options::{AttrGetter, DumpOptions, LoadOptions, MetaHints};
use crate::{dump, load};

// -----------------------------------------------------------------------------
// DumpContext

/// The state of one dump call, handed to every serializer.
///
/// Serializers dump nested values through [`dump`](Self::dump) so options,
/// cycle detection and class metadata follow them.
#[derive(Clone)]
pub struct DumpContext<'a> {
    options: &'a DumpOptions,
    in_flight: HashSet<Identity>,
    store_cls: bool,
}

impl<'a> DumpContext<'a> {
    pub(crate) fn new(options: &'a DumpOptions) -> Self {
        Self {
            options,
            in_flight: HashSet::default(),
            store_cls: false,
        }
    }

    #[inline]
    pub fn options(&self) -> &'a DumpOptions {
        self.options
    }

    #[inline]
    pub fn namespace(&self) -> &'a Namespace {
        self.options.namespace()
    }

    #[inline]
    pub fn strict(&self) -> bool {
        self.options.strict()
    }

    /// Dumps a nested value as its own type.
    #[inline]
    pub fn dump(&mut self, value: &dyn Reflect) -> Result<Value, Error> {
        dump::dump_value(value, None, self)
    }

    /// Dumps a nested value as `cls`, one of its base structs.
    #[inline]
    pub fn dump_as(&mut self, value: &dyn Reflect, cls: &'static TypeInfo) -> Result<Value, Error> {
        dump::dump_value(value, Some(cls), self)
    }

    /// `true` while dumping the attributes of an object in a verbose dump:
    /// object results then record their class instead of a full metadata
    /// block.
    #[inline]
    pub(crate) fn store_cls(&self) -> bool {
        self.store_cls
    }

    pub(crate) fn with_store_cls<R>(&mut self, store_cls: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = mem::replace(&mut self.store_cls, store_cls);
        let result = f(self);
        self.store_cls = previous;
        result
    }

    /// Marks a value as being dumped. Returns `false` if it already was.
    #[inline]
    pub(crate) fn enter(&mut self, identity: Identity) -> bool {
        self.in_flight.insert(identity)
    }

    #[inline]
    pub(crate) fn leave(&mut self, identity: Identity) {
        self.in_flight.remove(&identity);
    }
}

// -----------------------------------------------------------------------------
// LoadContext

/// The state of one load call, handed to every deserializer.
///
/// Deserializers load nested values through [`load`](Self::load) and its
/// siblings so options, metadata hints and paths follow them.
pub struct LoadContext<'a> {
    options: &'a LoadOptions,
    attr_getters: Option<&'a HashMap<String, AttrGetter>>,
    meta_hints: Option<Arc<MetaHints>>,
    path: String,
    inferred: bool,
}

impl<'a> LoadContext<'a> {
    pub(crate) fn new(options: &'a LoadOptions) -> Self {
        let getters = options.attr_getters();
        Self {
            options,
            attr_getters: (!getters.is_empty()).then_some(getters),
            meta_hints: options.meta_hints().cloned(),
            path: String::from("/"),
            inferred: false,
        }
    }

    /// A context for a worker thread: same options, hints and path, no
    /// attribute getters.
    pub(crate) fn worker(&self) -> LoadContext<'a> {
        Self {
            options: self.options,
            attr_getters: None,
            meta_hints: self.meta_hints.clone(),
            path: self.path.clone(),
            inferred: self.inferred,
        }
    }

    #[inline]
    pub fn options(&self) -> &'a LoadOptions {
        self.options
    }

    #[inline]
    pub fn namespace(&self) -> &'a Namespace {
        self.options.namespace()
    }

    #[inline]
    pub fn strict(&self) -> bool {
        self.options.strict()
    }

    /// `true` if the type being loaded was not given by the caller but
    /// taken from metadata or from the shape of the JSON value.
    #[inline]
    pub fn inferred(&self) -> bool {
        self.inferred
    }

    /// The metadata path of the value being loaded.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Loads a nested value into `target`.
    #[inline]
    pub fn load(&mut self, json: &Value, target: &'static TypeInfo) -> Result<Box<dyn Reflect>, Error> {
        load::load_value(json, Some(target), self)
    }

    /// Loads a nested value, inferring its type.
    #[inline]
    pub fn load_any(&mut self, json: &Value) -> Result<Box<dyn Reflect>, Error> {
        load::load_value(json, None, self)
    }

    /// Loads the attribute `name`: the metadata path descends into it.
    pub(crate) fn load_attribute(
        &mut self,
        json: &Value,
        target: Option<&'static TypeInfo>,
        name: &str,
    ) -> Result<Box<dyn Reflect>, Error> {
        let parent = mem::take(&mut self.path);
        self.path = if parent == "/" {
            format!("/{name}")
        } else {
            format!("{parent}/{name}")
        };
        let result = load::load_value(json, target, self);
        self.path = parent;
        result
    }

    /// Hands the attribute getters to the first object loaded.
    #[inline]
    pub(crate) fn take_attr_getters(&mut self) -> Option<&'a HashMap<String, AttrGetter>> {
        self.attr_getters.take()
    }

    /// The class the metadata names for the current path.
    pub(crate) fn meta_class(&self) -> Option<&str> {
        self.meta_hints
            .as_deref()
            .and_then(|hints| hints.get(&self.path))
            .map(String::as_str)
    }

    /// Runs `f` with the metadata of a value that carries its own: paths
    /// restart at its root.
    pub(crate) fn with_meta<R>(&mut self, hints: MetaHints, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous_hints = self.meta_hints.replace(Arc::new(hints));
        let previous_path = mem::replace(&mut self.path, String::from("/"));
        let result = f(self);
        self.meta_hints = previous_hints;
        self.path = previous_path;
        result
    }

    pub(crate) fn with_inferred<R>(&mut self, inferred: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = mem::replace(&mut self.inferred, inferred);
        let result = f(self);
        self.inferred = previous;
        result
    }
}
