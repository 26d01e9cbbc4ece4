//! Pool-backed thread-safe RNG
//!
//! Wraps a pool of thread-unsafe generators so that many threads can draw
//! concurrently without sharing generator state. Each call checks one
//! generator out, uses it exclusively, and checks it back in. Under
//! contention the pool mints extra generators rather than making callers wait.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use thiserror::Error;

use super::fill;
use super::seed::{SeedSource, ThreadRngSeedSource};
use super::xoshiro::Xoshiro256StarStar;
use super::UnsafeRng;
use crate::pool::{ElasticPool, ObjectPool, PoolConfig, PoolConfigError};

/// Errors returned by the pool-backed RNG
#[derive(Debug, Error, PartialEq)]
pub enum RngError {
    /// Check-out order across threads is nondeterministic, so a seed could
    /// never reproduce a sequence
    #[error("a pool-backed RNG cannot be seeded")]
    SeedUnsupported,

    #[error("invalid pool configuration: {0}")]
    InvalidPool(#[from] PoolConfigError),
}

/// Thread-safe random source backed by a pool of exclusive generators
///
/// # Example
/// ```
/// use fastpar_core::{PoolRng, SplitMixSeedSource};
///
/// let rng = PoolRng::xoshiro(SplitMixSeedSource::new(1)).unwrap();
///
/// let roll = rng.next_u32_below(6);
/// assert!(roll < 6);
///
/// let bytes = rng.fill_bytes(16);
/// assert_eq!(bytes.len(), 16);
/// ```
pub struct PoolRng<R, P = ElasticPool<R>> {
    pool: P,
    _rng: PhantomData<fn() -> R>,
}

impl<R> PoolRng<R, ElasticPool<R>>
where
    R: UnsafeRng + Send + 'static,
{
    /// Wrap generators minted by `factory` in a default-sized elastic pool
    pub fn new<F>(factory: F) -> Result<Self, RngError>
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        Self::with_config(PoolConfig::default(), factory)
    }

    /// Wrap generators minted by `factory` in a pool sized by `config`
    ///
    /// Fails with [`RngError::InvalidPool`] if `config` does not validate.
    pub fn with_config<F>(config: PoolConfig, factory: F) -> Result<Self, RngError>
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        Ok(Self::from_pool(ElasticPool::new(config, factory)?))
    }

    /// Number of generators minted so far
    pub fn instances_created(&self) -> usize {
        self.pool.created()
    }
}

impl PoolRng<Xoshiro256StarStar> {
    /// Pooled xoshiro256**; each new generator is seeded from `seeds`
    pub fn xoshiro<S>(seeds: S) -> Result<Self, RngError>
    where
        S: SeedSource + 'static,
    {
        Self::new(Self::xoshiro_factory(seeds))
    }

    /// Factory minting xoshiro256** generators, each seeded from `seeds`
    pub fn xoshiro_factory<S>(seeds: S) -> impl Fn() -> Xoshiro256StarStar + Send + Sync + 'static
    where
        S: SeedSource + 'static,
    {
        let seeds = Arc::new(seeds);
        move || Xoshiro256StarStar::new(seeds.next_seed() as i64)
    }

    /// Pooled xoshiro256** seeded from host entropy
    pub fn xoshiro_from_entropy() -> Result<Self, RngError> {
        Self::xoshiro(ThreadRngSeedSource)
    }
}

impl<R, P> PoolRng<R, P>
where
    R: UnsafeRng,
    P: ObjectPool<R>,
{
    /// Wrap an existing pool
    pub fn from_pool(pool: P) -> Self {
        Self {
            pool,
            _rng: PhantomData,
        }
    }

    /// Run `f` with exclusive use of one pooled generator
    #[inline]
    fn with_rng<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        let mut rng = self.pool.acquire();
        let value = f(&mut rng);
        self.pool.release(rng);
        value
    }

    /// Next 64-bit value
    #[inline]
    pub fn next_u64(&self) -> u64 {
        self.with_rng(|rng| rng.next_u64())
    }

    /// Next 32-bit value (high half of a 64-bit draw, as the bare generators)
    #[inline]
    pub fn next_u32(&self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Next non-negative `i64` (top bit cleared)
    #[inline]
    pub fn next_int63(&self) -> i64 {
        (self.next_u64() & 0x7FFF_FFFF_FFFF_FFFF) as i64
    }

    /// Value in `[0, bound)` by multiply-shift range reduction
    ///
    /// Uses `(x * bound) >> 32` on the low 32 bits of a draw instead of a
    /// modulo. When `bound` does not divide 2^32 some outputs are hit one
    /// more time than others (at most `bound / 2^32` relative bias); this is
    /// accepted in exchange for avoiding a division.
    ///
    /// A `bound` of zero always yields zero.
    #[inline]
    pub fn next_u32_below(&self, bound: u32) -> u32 {
        let x = self.next_u64() & 0xFFFF_FFFF;
        ((x * u64::from(bound)) >> 32) as u32
    }

    /// Allocate and return `n` random bytes
    pub fn fill_bytes(&self, n: usize) -> Vec<u8> {
        let mut buf = vec![0u8; n];
        self.fill_provided_buffer(&mut buf);
        buf
    }

    /// Fill caller-provided storage with random bytes
    pub fn fill_provided_buffer<'a>(&self, buf: &'a mut [u8]) -> &'a mut [u8] {
        self.with_rng(|rng| {
            fill::fill_bytes(rng, &mut *buf);
        });
        buf
    }

    /// Always fails: pooled generators cannot be seeded
    pub fn seed(&self, _seed: i64) -> Result<(), RngError> {
        Err(RngError::SeedUnsupported)
    }
}

impl<R, P: fmt::Debug> fmt::Debug for PoolRng<R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolRng").field("pool", &self.pool).finish()
    }
}
