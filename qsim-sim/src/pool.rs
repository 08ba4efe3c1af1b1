//! Fixed-size worker pools for index-parallel loops
//!
//! Pools are built lazily, one per requested size, and shared for the life of
//! the process. A loop writes each result into its own slot of a pre-sized
//! buffer, so nothing is locked while it runs.

use crate::error::{Result, SimulatorError};
use ahash::AHashMap;
use parking_lot::Mutex;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::{Arc, OnceLock};
use tracing::trace;

static POOLS: OnceLock<Mutex<AHashMap<usize, Arc<ThreadPool>>>> = OnceLock::new();

/// Shared pool with exactly `threads` workers
fn pool(threads: usize) -> Result<Arc<ThreadPool>> {
    let mut pools = POOLS.get_or_init(|| Mutex::new(AHashMap::new())).lock();
    if let Some(pool) = pools.get(&threads) {
        return Ok(Arc::clone(pool));
    }

    trace!("Creating worker pool with {} threads", threads);
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(move |index| format!("qsim-{}-{}", threads, index))
        .build()
        .map_err(|err| SimulatorError::ThreadPool(err.to_string()))?;
    let pool = Arc::new(pool);
    pools.insert(threads, Arc::clone(&pool));
    Ok(pool)
}

/// `[element(0), .., element(len - 1)]` computed on `concurrency` threads
pub(crate) fn fill_indexed<T, F>(len: usize, concurrency: usize, element: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> T + Send + Sync,
{
    try_fill_indexed(len, concurrency, |index| Ok(element(index)))
}

/// Fallible [`fill_indexed`]; the first error wins
pub(crate) fn try_fill_indexed<T, F>(len: usize, concurrency: usize, element: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Send + Sync,
{
    match concurrency {
        0 => Err(SimulatorError::ZeroConcurrency {
            knob: "concurrency",
        }),
        1 => (0..len).map(element).collect(),
        threads => pool(threads)?.install(|| (0..len).into_par_iter().map(element).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_and_parallel_agree() {
        let sequential = fill_indexed(100, 1, |i| i * i).unwrap();
        let parallel = fill_indexed(100, 3, |i| i * i).unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(parallel[9], 81);
    }

    #[test]
    fn test_pools_are_reused() {
        let first = pool(2).unwrap();
        let second = pool(2).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.current_num_threads(), 2);
    }

    #[test]
    fn test_zero_concurrency() {
        assert!(fill_indexed(4, 0, |i| i).is_err());
    }

    #[test]
    fn test_errors_propagate() {
        let result = try_fill_indexed(10, 2, |i| {
            if i == 7 {
                Err(SimulatorError::EmptyQubitCount)
            } else {
                Ok(i)
            }
        });
        assert_eq!(result, Err(SimulatorError::EmptyQubitCount));
    }
}
