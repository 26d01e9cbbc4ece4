//! Bounded parallel-for execution
//!
//! Runs a work function once for every index in `[0, n)` with at most
//! `limit` workers active at a time, and returns only when every index has
//! been processed.
//!
//! ## Execution model
//!
//! 1. **Dispatch**: `min(limit, n)` workers are spawned into a Rayon scope
//!    (global pool, or a dedicated pool built from [`ParallelConfig`]).
//! 2. **Claiming**: workers pull indices from a shared atomic cursor until it
//!    reaches `n`, so every index is claimed exactly once and fast workers
//!    naturally take more of the range.
//! 3. **Draining**: the scope acts as the barrier; the call returns once all
//!    workers have run out of indices.
//!
//! Tiny workloads (`limit <= 1` or `n <= 1`) skip dispatch and run inline on
//! the calling thread.
//!
//! ## Failure handling
//!
//! A panic in the work function is caught per index and recorded. The
//! worker then keeps claiming indices, so one bad item neither tears down
//! other workers nor leaves the rest of the range unvisited. All recorded
//! failures are returned as [`ParallelForError::WorkFailed`] after the
//! barrier.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// A single index whose work function panicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFailure {
    pub index: usize,
    /// Panic payload rendered as text
    pub message: String,
}

/// Errors surfaced by the parallel-for executor
#[derive(Debug, Error, PartialEq)]
pub enum ParallelForError {
    /// The work function panicked for one or more indices, sorted by index
    #[error("{} work item(s) panicked", .failures.len())]
    WorkFailed { failures: Vec<IndexFailure> },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl ParallelForError {
    /// Indices that failed, ascending (empty for non-work errors)
    pub fn failed_indices(&self) -> Vec<usize> {
        match self {
            ParallelForError::WorkFailed { failures } => {
                failures.iter().map(|f| f.index).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Executor configuration
///
/// # Fields
///
/// * `limit` - Maximum number of concurrently active workers per call
/// * `num_threads` - Size of a dedicated worker pool (None = Rayon global pool)
/// * `thread_name_prefix` - Name prefix for dedicated pool threads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    pub limit: usize,
    pub num_threads: Option<usize>,
    pub thread_name_prefix: String,
}

impl ParallelConfig {
    pub fn validate(&self) -> Result<(), ParallelForError> {
        if self.limit == 0 {
            return Err(ParallelForError::InvalidConfig(
                "limit must be positive".to_string(),
            ));
        }
        if self.num_threads == Some(0) {
            return Err(ParallelForError::InvalidConfig(
                "num_threads must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            limit: available_parallelism(),
            num_threads: None,
            thread_name_prefix: "fastpar-worker".to_string(),
        }
    }
}

/// Reusable executor bound to a config
///
/// # Example
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use fastpar_core::{ParallelConfig, ParallelFor};
///
/// let exec = ParallelFor::new(ParallelConfig { limit: 4, ..Default::default() }).unwrap();
/// let total = AtomicUsize::new(0);
/// exec.run(100, |i| {
///     total.fetch_add(i, Ordering::Relaxed);
/// })
/// .unwrap();
/// assert_eq!(total.into_inner(), 4950);
/// ```
pub struct ParallelFor {
    limit: usize,
    pool: Option<ThreadPool>,
}

impl ParallelFor {
    pub fn new(config: ParallelConfig) -> Result<Self, ParallelForError> {
        config.validate()?;

        let pool = match config.num_threads {
            Some(threads) => {
                let prefix = config.thread_name_prefix.clone();
                let pool = ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(move |i| format!("{}-{}", prefix, i))
                    .build()
                    .map_err(|e| ParallelForError::ThreadPool(e.to_string()))?;
                Some(pool)
            }
            None => None,
        };

        Ok(Self {
            limit: config.limit,
            pool,
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Run `f` for every index in `[0, n)`
    pub fn run<F>(&self, n: usize, f: F) -> Result<(), ParallelForError>
    where
        F: Fn(usize) + Sync,
    {
        execute(self.pool.as_ref(), self.limit, n, &f)
    }
}

impl std::fmt::Debug for ParallelFor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelFor")
            .field("limit", &self.limit)
            .field(
                "pool_threads",
                &self.pool.as_ref().map(|p| p.current_num_threads()),
            )
            .finish()
    }
}

/// Run `f` for every index in `[0, n)` with at most `limit` workers
///
/// A `limit` of zero is treated as one. Blocks until all indices are done.
///
/// # Example
/// ```
/// use fastpar_core::{parallel_for_limit, PaddedCounter};
///
/// let counters: Vec<PaddedCounter> = (0..4).map(|_| PaddedCounter::default()).collect();
/// parallel_for_limit(4, 4, |i| {
///     for _ in 0..1000 {
///         counters[i].add(1);
///     }
/// })
/// .unwrap();
/// assert_eq!(PaddedCounter::sum(&counters), 4000);
/// ```
pub fn parallel_for_limit<F>(limit: usize, n: usize, f: F) -> Result<(), ParallelForError>
where
    F: Fn(usize) + Sync,
{
    execute(None, limit, n, &f)
}

/// [`parallel_for_limit`] with the limit set to the available parallelism
pub fn parallel_for<F>(n: usize, f: F) -> Result<(), ParallelForError>
where
    F: Fn(usize) + Sync,
{
    execute(None, available_parallelism(), n, &f)
}

fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn execute<F>(
    pool: Option<&ThreadPool>,
    limit: usize,
    n: usize,
    f: &F,
) -> Result<(), ParallelForError>
where
    F: Fn(usize) + Sync,
{
    if n == 0 {
        return Ok(());
    }

    let workers = limit.max(1).min(n);
    let cursor = AtomicUsize::new(0);
    let failures = Mutex::new(Vec::new());

    if workers == 1 {
        debug!(n, limit, "parallel_for running inline");
        drain(&cursor, n, f, &failures);
    } else {
        debug!(n, limit, workers, "parallel_for dispatching");
        let dispatch = || {
            rayon::scope(|scope| {
                for _ in 0..workers {
                    scope.spawn(|_| drain(&cursor, n, f, &failures));
                }
            })
        };
        match pool {
            Some(pool) => pool.install(dispatch),
            None => dispatch(),
        }
    }

    let mut failures = failures
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);
    if failures.is_empty() {
        return Ok(());
    }

    failures.sort_by_key(|failure| failure.index);
    warn!(
        failed = failures.len(),
        first_index = failures[0].index,
        "parallel_for work function panicked"
    );
    Err(ParallelForError::WorkFailed { failures })
}

/// Claim and run indices until the cursor reaches `n`
fn drain<F>(cursor: &AtomicUsize, n: usize, f: &F, failures: &Mutex<Vec<IndexFailure>>)
where
    F: Fn(usize) + Sync,
{
    // Stop the cursor at `n` so it can never wrap back to 0
    while let Ok(index) =
        cursor.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |i| (i < n).then(|| i + 1))
    {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| f(index))) {
            let failure = IndexFailure {
                index,
                message: panic_message(&*payload),
            };
            failures
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(failure);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
