//! Seed sources for minting pooled generators
//!
//! A seed source is injected into [`PoolRng`](super::PoolRng) constructors
//! instead of reaching for a process-wide random source, which keeps tests
//! deterministic and avoids hidden shared state.

use std::sync::atomic::{AtomicU64, Ordering};

use super::splitmix::splitmix64;

/// Thread-safe provider of 64-bit seeds
pub trait SeedSource: Send + Sync {
    /// Produce the next seed
    fn next_seed(&self) -> u64;
}

impl<F> SeedSource for F
where
    F: Fn() -> u64 + Send + Sync,
{
    fn next_seed(&self) -> u64 {
        self()
    }
}

/// Seeds drawn from the host's thread-local entropy-seeded generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSeedSource;

impl SeedSource for ThreadRngSeedSource {
    fn next_seed(&self) -> u64 {
        rand::random::<u64>()
    }
}

/// Deterministic seed stream: SplitMix64 over an atomic counter
///
/// # Example
/// ```
/// use fastpar_core::{SeedSource, SplitMixSeedSource};
///
/// let a = SplitMixSeedSource::new(1);
/// let b = SplitMixSeedSource::new(1);
/// assert_eq!(a.next_seed(), b.next_seed());
/// ```
#[derive(Debug, Default)]
pub struct SplitMixSeedSource {
    counter: AtomicU64,
}

impl SplitMixSeedSource {
    pub fn new(base: u64) -> Self {
        Self {
            counter: AtomicU64::new(base),
        }
    }
}

impl SeedSource for SplitMixSeedSource {
    fn next_seed(&self) -> u64 {
        splitmix64(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}
