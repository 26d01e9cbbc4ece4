//! Fastpar Core - contention-free concurrency primitives
//!
//! Low-level building blocks for squeezing throughput out of multicore
//! hardware by avoiding the three classic contention points: locks, shared
//! cache lines and shared allocators.
//!
//! # Architecture
//!
//! - **rng**: SplitMix64, Xoshiro256** and the pool-backed thread-safe wrapper
//! - **pool**: Elastic object pool the RNG wrapper checks generators out of
//! - **counter**: Cache-line isolated atomic counter
//! - **parallel**: Bounded parallel-for executor
//!
//! # Critical Invariants
//!
//! 1. Generator output is bit-exact for a given state (reference vectors)
//! 2. A thread-unsafe generator is only ever touched through `&mut`
//! 3. Every parallel-for index runs exactly once, failures are never lost

// Module declarations
pub mod counter;
pub mod parallel;
pub mod pool;
pub mod rng;

// Re-exports for convenience
pub use counter::{PaddedCounter, CACHE_LINE_SIZE};
pub use parallel::{
    parallel_for, parallel_for_limit, IndexFailure, ParallelConfig, ParallelFor,
    ParallelForError,
};
pub use pool::{ElasticPool, ObjectPool, PoolConfig, PoolConfigError};
pub use rng::{
    fill_bytes, splitmix64, Jsf64, Pcg32, Pcg32x2, PoolRng, RngError, SeedSource,
    SeedableUnsafeRng, SplitMixSeedSource, ThreadRngSeedSource, UnsafeRng, Xoshiro256StarStar,
};
