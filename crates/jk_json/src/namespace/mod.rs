//! Namespaces: isolated sets of converters, validators, announced types and
//! warning settings.
//!
//! Every dump and load runs against one namespace, taken from its options.
//! [`Namespace::global`] is the one used unless another is given;
//! [`Namespace::fork`] copies a namespace so it can be changed without
//! affecting the original.

// -----------------------------------------------------------------------------
// Modules

mod defaults;
mod table;

// -----------------------------------------------------------------------------
// Imports

use std::any::TypeId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use jk_reflect::Reflect;
use jk_reflect::auto_register;
use jk_reflect::info::{TypeInfo, Typed};
use jk_utils::TypeIdMap;
use jk_utils::hash::{HashMap, HashSet};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::context::{DumpContext, LoadContext};
use crate::converters::serde as serde_bridge;
use crate::descriptor::TypeDescriptor;
use crate::error::Error;

pub(crate) use table::{ConverterTable, Resolved};

// -----------------------------------------------------------------------------
// Converter signatures

/// Turns a value into JSON.
///
/// The second argument is the type the value is dumped as: its own type,
/// a base struct for [`dump_as`](crate::dump_as), or the underlying type
/// when the converter was found for a newtype's inner type (the value is
/// then the inner value).
pub type SerializeFn = fn(&dyn Reflect, &'static TypeInfo, &mut DumpContext<'_>) -> Result<Value, Error>;

/// Builds a value of the given type from JSON.
pub type DeserializeFn = fn(&Value, &'static TypeInfo, &mut LoadContext<'_>) -> Result<Box<dyn Reflect>, Error>;

/// Checks a loaded value. `Ok(false)` rejects it.
pub type ValidateFn = fn(&dyn Reflect) -> Result<bool, Error>;

// -----------------------------------------------------------------------------
// Namespace

/// A shared handle to a namespace. Clones refer to the same namespace.
///
/// ```
/// use jk_json::{DumpOptions, Namespace, TypeDescriptor, dump_with};
/// use jk_reflect::{Reflect, info::TypeInfo};
/// use serde_json::{Value, json};
///
/// fn shout(value: &dyn Reflect, _: &'static TypeInfo, _: &mut jk_json::DumpContext<'_>)
///     -> Result<Value, jk_json::Error>
/// {
///     Ok(Value::String(value.downcast_ref::<String>().unwrap().to_uppercase()))
/// }
///
/// let loud = Namespace::global().fork(Some("loud"));
/// loud.register_serializer(shout, [TypeDescriptor::of::<String>()], true);
///
/// let options = DumpOptions::new().with_namespace(loud);
/// assert_eq!(dump_with(&String::from("hi"), &options).unwrap(), json!("HI"));
/// assert_eq!(jk_json::dump(&String::from("hi")).unwrap(), json!("hi"));
/// ```
#[derive(Clone)]
pub struct Namespace {
    inner: Arc<NamespaceInner>,
}

struct NamespaceInner {
    name: String,
    forks: AtomicUsize,
    state: RwLock<State>,
    memo: RwLock<LookupMemo>,
}

#[derive(Clone)]
struct State {
    serializers: ConverterTable<SerializeFn>,
    deserializers: ConverterTable<DeserializeFn>,
    validators: ConverterTable<ValidateFn>,
    announced_by_name: HashMap<String, &'static TypeInfo>,
    announced_by_type: HashMap<TypeId, String>,
    suppress_all: bool,
    suppressed: HashSet<String>,
}

#[derive(Default)]
struct LookupMemo {
    serializers: TypeIdMap<Option<Resolved<SerializeFn>>>,
    deserializers: TypeIdMap<Option<Resolved<DeserializeFn>>>,
    validators: TypeIdMap<Option<Resolved<ValidateFn>>>,
}

impl State {
    fn empty() -> Self {
        Self {
            serializers: ConverterTable::new(),
            deserializers: ConverterTable::new(),
            validators: ConverterTable::new(),
            announced_by_name: HashMap::default(),
            announced_by_type: HashMap::default(),
            suppress_all: false,
            suppressed: HashSet::default(),
        }
    }
}

impl Namespace {
    fn from_state(name: String, state: State) -> Self {
        Self {
            inner: Arc::new(NamespaceInner {
                name,
                forks: AtomicUsize::new(0),
                state: RwLock::new(state),
                memo: RwLock::new(LookupMemo::default()),
            }),
        }
    }

    /// Creates a namespace with the default converters.
    pub fn new(name: impl Into<String>) -> Self {
        let mut state = State::empty();
        defaults::register_defaults(&mut state);
        Self::from_state(name.into(), state)
    }

    /// Creates a namespace without any converter.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::from_state(name.into(), State::empty())
    }

    /// Returns the process-wide namespace named `"default"`.
    pub fn global() -> &'static Namespace {
        static GLOBAL: OnceLock<Namespace> = OnceLock::new();
        GLOBAL.get_or_init(|| Namespace::new("default"))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns `true` if both handles refer to the same namespace.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Copies this namespace into a new, independent one.
    ///
    /// Converters, validators, announced types and warning settings are all
    /// copied. Without a name, the fork is called `<name>_fork<n>` with `n`
    /// counting the forks of this namespace from 1.
    pub fn fork(&self, name: Option<&str>) -> Namespace {
        let count = self.inner.forks.fetch_add(1, Ordering::Relaxed) + 1;
        let name = match name {
            Some(name) => String::from(name),
            None => format!("{}_fork{count}", self.name()),
        };
        let state = self.read().clone();
        log::debug!("forked namespace `{}` into `{name}`", self.name());
        Self::from_state(name, state)
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the converter tables. Memoized lookups are dropped.
    fn write_tables(&self) -> RwLockWriteGuard<'_, State> {
        let state = self.write();
        self.clear_memo();
        state
    }

    // ---- Registration

    /// Registers `func` as the serializer of every type in `types`.
    ///
    /// A high-priority registration is tried before the others when a type
    /// has no serializer of its own and falls back on a base or a family;
    /// a low-priority one after them. The latest registration for the same
    /// name wins.
    pub fn register_serializer(
        &self,
        func: SerializeFn,
        types: impl IntoIterator<Item = TypeDescriptor>,
        high_priority: bool,
    ) {
        self.write_tables().serializers.register(func, types, high_priority);
    }

    /// Registers `func` as the deserializer of every type in `types`.
    ///
    /// See [`register_serializer`](Self::register_serializer) for priorities.
    pub fn register_deserializer(
        &self,
        func: DeserializeFn,
        types: impl IntoIterator<Item = TypeDescriptor>,
        high_priority: bool,
    ) {
        self.write_tables().deserializers.register(func, types, high_priority);
    }

    /// Registers `func` to check every value loaded as one of `types`.
    pub fn register_validator(&self, func: ValidateFn, types: impl IntoIterator<Item = TypeDescriptor>) {
        self.write_tables().validators.register(func, types, true);
    }

    /// Dumps and loads `T` through its serde implementations.
    pub fn register_serde<T>(&self)
    where
        T: Reflect + Typed + Serialize + DeserializeOwned,
    {
        let mut state = self.write_tables();
        state
            .serializers
            .register(serde_bridge::dump::<T>, [TypeDescriptor::of::<T>()], true);
        state
            .deserializers
            .register(serde_bridge::load::<T>, [TypeDescriptor::of::<T>()], true);
    }

    // ---- Lookup

    /// Returns the serializer used for values of type `info`, if any.
    #[inline]
    pub fn serializer(&self, info: &'static TypeInfo) -> Option<SerializeFn> {
        self.resolve_serializer(info).map(|found| found.func)
    }

    /// Returns the deserializer used for targets of type `info`, if any.
    #[inline]
    pub fn deserializer(&self, info: &'static TypeInfo) -> Option<DeserializeFn> {
        self.resolve_deserializer(info).map(|found| found.func)
    }

    pub(crate) fn resolve_serializer(&self, info: &'static TypeInfo) -> Option<Resolved<SerializeFn>> {
        self.memoized(info, |memo| &mut memo.serializers, |state| &state.serializers)
    }

    pub(crate) fn resolve_deserializer(&self, info: &'static TypeInfo) -> Option<Resolved<DeserializeFn>> {
        self.memoized(info, |memo| &mut memo.deserializers, |state| &state.deserializers)
    }

    pub(crate) fn validator(&self, info: &'static TypeInfo) -> Option<ValidateFn> {
        self.memoized(info, |memo| &mut memo.validators, |state| &state.validators)
            .map(|found| found.func)
    }

    fn memoized<F: Copy>(
        &self,
        info: &'static TypeInfo,
        memo_of: impl Fn(&mut LookupMemo) -> &mut TypeIdMap<Option<Resolved<F>>>,
        table_of: impl Fn(&State) -> &ConverterTable<F>,
    ) -> Option<Resolved<F>> {
        let type_id = info.type_id();
        {
            let mut memo = self.inner.memo.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(found) = memo_of(&mut memo).get(&type_id) {
                return *found;
            }
        }
        let found = table_of(&self.read()).lookup(info);
        let mut memo = self.inner.memo.write().unwrap_or_else(PoisonError::into_inner);
        memo_of(&mut memo).insert(type_id, found);
        found
    }

    /// Drops memoized converter lookups.
    pub(crate) fn clear_memo(&self) {
        let mut memo = self.inner.memo.write().unwrap_or_else(PoisonError::into_inner);
        *memo = LookupMemo::default();
    }

    // ---- Announced types

    /// Makes `info` resolvable by name when found in input metadata.
    ///
    /// The name defaults to the type path. A custom name is also the one
    /// written into verbose output for this type.
    pub fn announce(&self, info: &'static TypeInfo, name: Option<&str>) {
        let name = String::from(name.unwrap_or_else(|| info.type_path()));
        let mut state = self.write();
        state.announced_by_name.insert(name.clone(), info);
        state.announced_by_type.insert(info.type_id(), name);
    }

    /// Shorthand for [`announce`](Self::announce) with the default name.
    #[inline]
    pub fn announce_type<T: Typed>(&self) {
        self.announce(T::type_info(), None);
    }

    /// Announces `info` unless already known. Used by verbose dumps.
    pub(crate) fn announce_dumped(&self, info: &'static TypeInfo) {
        if !self.read().announced_by_type.contains_key(&info.type_id()) {
            self.announce(info, None);
        }
    }

    /// Finds the type named `name` in metadata.
    ///
    /// Announced types come first, then `#[reflect(auto_register)]` types by
    /// type path.
    pub fn resolve_class(&self, name: &str) -> Option<&'static TypeInfo> {
        if let Some(info) = self.read().announced_by_name.get(name) {
            return Some(*info);
        }
        auto_register::registered_types()
            .into_iter()
            .find(|info| info.type_path() == name)
    }

    /// Returns the name written into metadata for `info`.
    pub fn class_name(&self, info: &TypeInfo) -> String {
        self.read()
            .announced_by_type
            .get(&info.type_id())
            .cloned()
            .unwrap_or_else(|| String::from(info.type_path()))
    }

    // ---- Warnings

    /// Turns every warning of this namespace off, or back on.
    pub fn suppress_warnings(&self, suppress: bool) {
        self.write().suppress_all = suppress;
    }

    /// Turns the warnings with `code` off.
    pub fn suppress_warning(&self, code: &str) {
        self.write().suppressed.insert(String::from(code));
    }

    /// Returns `true` if a warning with `code` would be emitted.
    pub fn warns(&self, code: &str) -> bool {
        let state = self.read();
        !state.suppress_all && !state.suppressed.contains(code)
    }

    /// Emits a warning through [`log`], unless suppressed.
    pub fn warn(&self, message: &str, code: &str) {
        if self.warns(code) {
            log::warn!(
                "{message} Use `suppress_warning(\"{code}\")` or `suppress_warnings(true)` to turn off this message."
            );
        }
    }
}

impl std::fmt::Debug for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Namespace").field("name", &self.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use jk_reflect::Reflect;
    use jk_reflect::derive::Reflect;
    use jk_reflect::info::{TypeInfo, Typed};
    use jk_reflect::info::TypePath;
    use serde_json::{Value, json};

    use super::Namespace;
    use crate::context::DumpContext;
    use crate::descriptor::TypeDescriptor;
    use crate::error::Error;
    use crate::options::DumpOptions;
    use crate::dump_with;

    fn constant(_: &dyn Reflect, _: &'static TypeInfo, _: &mut DumpContext<'_>) -> Result<Value, Error> {
        Ok(Value::from("constant"))
    }

    #[derive(Reflect)]
    struct Tag {
        label: String,
    }

    #[test]
    fn forks_are_named_and_isolated() {
        let base = Namespace::new("base");
        let first = base.fork(None);
        let second = base.fork(None);
        assert_eq!(first.name(), "base_fork1");
        assert_eq!(second.name(), "base_fork2");
        assert_eq!(first.fork(None).name(), "base_fork1_fork1");
        assert_eq!(base.fork(Some("custom")).name(), "custom");

        first.register_serializer(constant, [TypeDescriptor::of::<String>()], true);
        let text = String::from("text");
        let dump_in = |ns: &Namespace| dump_with(&text, &DumpOptions::new().with_namespace(ns.clone())).unwrap();
        assert_eq!(dump_in(&first), json!("constant"));
        assert_eq!(dump_in(&base), json!("text"));
        assert_eq!(dump_in(&second), json!("text"));

        // A fork of a fork starts from its parent's state.
        let nested = first.fork(None);
        assert_eq!(dump_in(&nested), json!("constant"));
        assert!(!nested.ptr_eq(&first));
    }

    #[test]
    fn empty_namespaces_have_no_converters() {
        let empty = Namespace::empty("empty");
        assert!(empty.serializer(u8::type_info()).is_none());
        assert!(Namespace::new("full").serializer(u8::type_info()).is_some());
    }

    #[test]
    fn announced_names_resolve() {
        let ns = Namespace::new("announce");
        assert!(ns.resolve_class(Tag::type_path()).is_none());

        ns.announce_type::<Tag>();
        assert!(ns.resolve_class(Tag::type_path()).unwrap().is::<Tag>());

        ns.announce(Tag::type_info(), Some("tag"));
        assert!(ns.resolve_class("tag").unwrap().is::<Tag>());
        assert_eq!(ns.class_name(Tag::type_info()), "tag");
    }

    #[test]
    fn announcing_keeps_memoized_lookups() {
        let ns = Namespace::new("memo");
        let memoized = |ns: &Namespace| {
            let memo = ns.inner.memo.read().unwrap();
            memo.serializers.get(&TypeId::of::<u8>()).is_some()
        };

        assert!(ns.serializer(u8::type_info()).is_some());
        assert!(memoized(&ns));

        ns.announce_dumped(Tag::type_info());
        ns.suppress_warning("some-code");
        assert!(memoized(&ns));

        ns.register_serializer(constant, [TypeDescriptor::of::<String>()], true);
        assert!(!memoized(&ns));
    }

    #[test]
    fn warnings_can_be_suppressed() {
        let ns = Namespace::new("warnings");
        assert!(ns.warns("some-code"));
        ns.suppress_warning("some-code");
        assert!(!ns.warns("some-code"));
        assert!(ns.warns("other-code"));

        let fork = ns.fork(None);
        assert!(!fork.warns("some-code"));
        fork.suppress_warnings(true);
        assert!(!fork.warns("other-code"));
        assert!(ns.warns("other-code"));
    }
}
