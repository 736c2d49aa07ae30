//! Chained-carry parallel inclusive prefix sum.
//!
//! A fixed-size integer sequence is partitioned across a fixed number of
//! workers. Each worker scans its own partition immediately; the running
//! carry then travels from the lowest-indexed partition to the highest
//! through one-shot point-to-point handoffs, with no global barrier and no
//! shared accumulator.

use std::env;
use std::sync::OnceLock;
use std::thread;

use num_traits::{CheckedAdd, Zero};

mod coordinator;
mod error;
mod handoff;
pub mod metrics;
mod scanner;
pub mod store;
pub mod verify;

pub use error::{ScanError, ScanResult, WorkerError};
pub use store::SequenceStore;
pub use verify::TimedScan;

/// Element types the engine can scan: summed with overflow checking, moved
/// freely across worker threads.
pub trait ScanElement:
    Copy + Send + Sync + 'static + CheckedAdd + Zero + PartialEq
{
}

impl<T> ScanElement for T where T: Copy + Send + Sync + 'static + CheckedAdd + Zero + PartialEq {}

/// O(N) single-pass reference scan. Serves as the correctness oracle and
/// the performance baseline for the parallel engine.
pub fn sequential_scan<T: ScanElement>(mut values: Vec<T>) -> ScanResult<Vec<T>> {
    metrics::record_scan(metrics::OPERATION_SCAN, metrics::MODE_SEQUENTIAL);
    scanner::local_scan(&mut values, 0)
        .map_err(|source| ScanError::WorkerFailure { pid: 0, source })?;
    Ok(values)
}

/// Parallel scan with an explicit worker count. Fails with
/// `InvalidConfiguration` when `workers` is zero or exceeds the sequence
/// length; an empty sequence returns empty regardless of `workers >= 1`.
pub fn parallel_scan<T: ScanElement>(mut values: Vec<T>, workers: usize) -> ScanResult<Vec<T>> {
    coordinator::run_parallel(&mut values, workers)?;
    Ok(values)
}

/// Parallel scan with the resolved default worker count, clamped to the
/// sequence length.
pub fn scan<T: ScanElement>(values: Vec<T>) -> ScanResult<Vec<T>> {
    let workers = default_workers().min(values.len()).max(1);
    parallel_scan(values, workers)
}

/// Worker count used by [`scan`]: the `PRESCAN_WORKERS` environment
/// variable when set to a positive integer, otherwise the machine's
/// available parallelism. Resolved once per process.
pub fn default_workers() -> usize {
    static WORKERS: OnceLock<usize> = OnceLock::new();
    *WORKERS.get_or_init(|| {
        let explicit = env::var("PRESCAN_WORKERS")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|&workers| workers >= 1);
        explicit.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|threads| threads.get())
                .unwrap_or(1)
        })
    })
}
