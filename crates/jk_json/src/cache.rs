use std::cell::Cell;

use crate::name;
use crate::namespace::Namespace;

std::thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Marks a public dump or load call on this thread.
///
/// When the outermost call returns, the memoized names and the converter
/// lookups of its namespace are dropped, so registrations made between calls
/// always take effect.
pub(crate) struct CallGuard<'a> {
    namespace: &'a Namespace,
    outermost: bool,
}

impl<'a> CallGuard<'a> {
    pub fn enter(namespace: &'a Namespace) -> Self {
        let depth = DEPTH.get();
        DEPTH.set(depth + 1);
        Self {
            namespace,
            outermost: depth == 0,
        }
    }
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        DEPTH.set(DEPTH.get().saturating_sub(1));
        if self.outermost {
            name::clear_memo();
            self.namespace.clear_memo();
            log::trace!("cleared lookup caches of namespace `{}`", self.namespace.name());
        }
    }
}
