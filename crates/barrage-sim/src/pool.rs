//! Bounded worker pools for the simulation hot paths.
//!
//! Each hot path (physics, collision) owns its own pool; the pools are
//! sized independently and torn down independently when their owning
//! subsystem drops. Dispatch partitions work into contiguous batches and
//! blocks the calling thread until every batch completes, so each step is
//! observably atomic to callers. Because every dispatch joins before
//! returning, a pool is always idle by the time it is dropped and teardown
//! cannot block on in-flight batches.

use std::thread;

use rayon::{ThreadPool, ThreadPoolBuilder};

use barrage_core::constants::POOL_MIN_WORKERS;

/// A fixed-size worker pool with batch-partitioned dispatch.
pub struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Primary pool: hardware parallelism minus one, floored at two.
    pub fn primary(name: &str) -> Self {
        let hw = thread::available_parallelism().map_or(1, |n| n.get());
        Self::with_workers(name, hw.saturating_sub(1).max(POOL_MIN_WORKERS))
    }

    /// Secondary pool: half the given size, floored at two.
    pub fn secondary(name: &str, primary_workers: usize) -> Self {
        Self::with_workers(name, (primary_workers / 2).max(POOL_MIN_WORKERS))
    }

    fn with_workers(name: &str, workers: usize) -> Self {
        let label = name.to_owned();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(move |i| format!("{label}-{i}"))
            .build()
            .expect("Failed to build worker pool");
        tracing::debug!(name, workers, "worker pool ready");
        Self { pool, workers }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Contiguous batch size for `count` items: `count / workers + 1`.
    pub fn batch_size(&self, count: usize) -> usize {
        count / self.workers + 1
    }

    /// Split `items` into contiguous batches of disjoint `&mut` chunks and
    /// run `op` on each batch across the pool. Blocks until all complete.
    pub fn dispatch_mut<T, F>(&self, items: &mut [T], op: F)
    where
        T: Send,
        F: Fn(&mut [T]) + Sync,
    {
        let batch = self.batch_size(items.len());
        self.pool.scope(|scope| {
            for chunk in items.chunks_mut(batch) {
                scope.spawn(|_| op(chunk));
            }
        });
    }

    /// Shared-read variant of `dispatch_mut`.
    pub fn dispatch<T, F>(&self, items: &[T], op: F)
    where
        T: Sync,
        F: Fn(&[T]) + Sync,
    {
        let batch = self.batch_size(items.len());
        self.pool.scope(|scope| {
            for chunk in items.chunks(batch) {
                scope.spawn(|_| op(chunk));
            }
        });
    }
}
