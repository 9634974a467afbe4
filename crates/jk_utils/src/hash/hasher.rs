//! Provide `FixedHasher` and `NoOpHasher`.
//!
//! `FixedHasher` is based on `foldhash` with a fixed seed, so the same input
//! hashes to the same value in every process. Relocated map keys rely on it:
//! the hash is written to the wire and has to be reproducible.
//!
//! `NoOpHasher` passes integer input straight through, for keys that are
//! already well distributed such as [`TypeId`](std::any::TypeId).

use std::hash::{BuildHasher, Hash, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x4A53_4F4E_4B49_5421);

/// A hasher whose results only depend on the input.
pub type FixedHasher = FoldHasher<'static>;

/// Fixed hash state based upon a fixed seed.
///
/// # Examples
///
/// ```
/// use std::hash::{BuildHasher, Hash, Hasher};
/// use jk_utils::hash::FixedHashState;
///
/// let mut a = FixedHashState.build_hasher();
/// "key".hash(&mut a);
///
/// let mut b = FixedHashState.build_hasher();
/// "key".hash(&mut b);
///
/// assert_eq!(a.finish(), b.finish());
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// Hash a value with [`FixedHashState`].
///
/// The result is stable across runs of the same build.
///
/// ```
/// use jk_utils::hash::stable_hash;
///
/// assert_eq!(stable_hash("[1,2]"), stable_hash("[1,2]"));
/// assert_ne!(stable_hash("[1,2]"), stable_hash("[2,1]"));
/// ```
#[inline]
pub fn stable_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    FixedHashState.hash_one(value)
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A hasher that folds the written bytes into a `u64` without mixing.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// [`BuildHasher`] for [`NoOpHasher`].
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher::default()
    }
}
