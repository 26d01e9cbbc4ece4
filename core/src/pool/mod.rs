//! Elastic object pool
//!
//! Hands out owned instances of `T` and takes them back. When the idle queue
//! is empty a new instance is minted by the factory, so contention shows up
//! as extra allocations instead of blocking.
//!
//! # Design
//!
//! - **Lock-free idle queue**: `crossbeam_queue::ArrayQueue` (CAS based)
//! - **Bounded retention**: at most `max_idle` instances are kept; surplus
//!   releases are dropped
//! - **No eviction policy**: callers must not rely on which instance they get

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_queue::ArrayQueue;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// Check-out / check-in capability
pub trait ObjectPool<T>: Send + Sync {
    /// Take an instance, minting one if none is idle
    fn acquire(&self) -> T;

    /// Return an instance previously taken with [`acquire`](Self::acquire)
    fn release(&self, item: T);
}

/// Errors raised when validating a [`PoolConfig`]
#[derive(Debug, Error, PartialEq)]
pub enum PoolConfigError {
    #[error("max_idle must be positive")]
    ZeroCapacity,
}

/// Pool sizing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum number of idle instances retained between uses
    pub max_idle: usize,
}

impl PoolConfig {
    /// Check the config is usable; `max_idle` must be positive
    pub fn validate(&self) -> Result<(), PoolConfigError> {
        if self.max_idle == 0 {
            return Err(PoolConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            max_idle: cpus.saturating_mul(4),
        }
    }
}

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Lock-free pool that grows on demand
///
/// # Example
/// ```
/// use fastpar_core::{ElasticPool, ObjectPool, PoolConfig};
///
/// let pool = ElasticPool::new(PoolConfig::default(), || Vec::<u8>::with_capacity(64)).unwrap();
/// let buf = pool.acquire();
/// pool.release(buf);
/// assert_eq!(pool.created(), 1);
/// assert_eq!(pool.idle(), 1);
/// ```
pub struct ElasticPool<T> {
    idle: ArrayQueue<T>,
    factory: Factory<T>,
    created: AtomicUsize,
}

impl<T> ElasticPool<T> {
    /// Create an empty pool; instances are minted lazily
    pub fn new<F>(config: PoolConfig, factory: F) -> Result<Self, PoolConfigError>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        config.validate()?;
        Ok(Self {
            idle: ArrayQueue::new(config.max_idle),
            factory: Box::new(factory),
            created: AtomicUsize::new(0),
        })
    }

    /// Total instances minted by the factory so far
    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }

    /// Instances currently sitting idle
    pub fn idle(&self) -> usize {
        self.idle.len()
    }

    /// Maximum number of idle instances retained
    pub fn capacity(&self) -> usize {
        self.idle.capacity()
    }
}

impl<T: Send> ObjectPool<T> for ElasticPool<T> {
    #[inline]
    fn acquire(&self) -> T {
        match self.idle.pop() {
            Some(item) => item,
            None => {
                let total = self.created.fetch_add(1, Ordering::Relaxed) + 1;
                trace!(total, "pool minted new instance");
                (self.factory)()
            }
        }
    }

    #[inline]
    fn release(&self, item: T) {
        if self.idle.push(item).is_err() {
            trace!(capacity = self.idle.capacity(), "pool full, dropping surplus instance");
        }
    }
}

impl<T> fmt::Debug for ElasticPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElasticPool")
            .field("idle", &self.idle.len())
            .field("capacity", &self.idle.capacity())
            .field("created", &self.created())
            .finish()
    }
}
