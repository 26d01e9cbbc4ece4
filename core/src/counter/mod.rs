//! Cache-line isolated atomic counter
//!
//! An `AtomicI64` aligned (and therefore sized) to a full cache line, so an
//! array of counters, one per worker, never puts two counters on the same
//! line. Without the padding, workers bumping neighbouring counters keep
//! invalidating each other's cache lines even though they share no data.
//!
//! # Ordering
//!
//! All operations are individually atomic and use `Relaxed` ordering. An
//! `add` on one thread followed by a `get` on another carries no
//! happens-before edge; callers that need one must synchronize themselves
//! (joining the writer thread is enough).

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Assumed cache line size in bytes
pub const CACHE_LINE_SIZE: usize = 64;

/// 64-bit atomic counter occupying a full cache line
///
/// Serializes exactly like a bare `i64`.
///
/// # Example
/// ```
/// use fastpar_core::{PaddedCounter, CACHE_LINE_SIZE};
///
/// let counter = PaddedCounter::new(10);
/// assert_eq!(counter.add(5), 15);
/// assert_eq!(counter.get(), 15);
/// assert_eq!(std::mem::size_of::<PaddedCounter>(), CACHE_LINE_SIZE);
/// ```
#[repr(C, align(64))]
#[derive(Default)]
pub struct PaddedCounter {
    value: AtomicI64,
    // Remaining bytes of the line are compiler-inserted padding
}

// Keep the attribute above in sync with the constant
const _: () = assert!(std::mem::align_of::<PaddedCounter>() == CACHE_LINE_SIZE);
const _: () = assert!(std::mem::size_of::<PaddedCounter>() == CACHE_LINE_SIZE);

impl PaddedCounter {
    pub const fn new(value: i64) -> Self {
        Self {
            value: AtomicI64::new(value),
        }
    }

    /// Add `delta` and return the new value (wraps on overflow)
    #[inline]
    pub fn add(&self, delta: i64) -> i64 {
        self.value
            .fetch_add(delta, Ordering::Relaxed)
            .wrapping_add(delta)
    }

    #[inline]
    pub fn get(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set(&self, value: i64) {
        self.value.store(value, Ordering::Relaxed);
    }

    /// Store `value`, returning the previous one
    #[inline]
    pub fn swap(&self, value: i64) -> i64 {
        self.value.swap(value, Ordering::Relaxed)
    }

    /// Wrapping sum of a slice of counters
    pub fn sum(counters: &[PaddedCounter]) -> i64 {
        counters
            .iter()
            .fold(0i64, |acc, c| acc.wrapping_add(c.get()))
    }

    pub fn into_inner(self) -> i64 {
        self.value.into_inner()
    }
}

impl From<i64> for PaddedCounter {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl Clone for PaddedCounter {
    /// Snapshot of the current value in a fresh counter
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl fmt::Debug for PaddedCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PaddedCounter").field(&self.get()).finish()
    }
}

impl Serialize for PaddedCounter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.get())
    }
}

impl<'de> Deserialize<'de> for PaddedCounter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::new)
    }
}
