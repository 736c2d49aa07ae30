use std::time::{Duration, Instant};

use crate::error::ScanResult;
use crate::store::SequenceStore;
use crate::{parallel_scan, sequential_scan, ScanElement};

/// Outcome of one wall-clock-timed scan run.
#[derive(Clone, Debug)]
pub struct TimedScan<T> {
    pub values: Vec<T>,
    pub workers: usize,
    pub parallel: bool,
    pub elapsed: Duration,
}

impl<T: ScanElement> TimedScan<T> {
    pub fn run_sequential(values: Vec<T>) -> ScanResult<Self> {
        let started = Instant::now();
        let values = sequential_scan(values)?;
        Ok(Self {
            values,
            workers: 1,
            parallel: false,
            elapsed: started.elapsed(),
        })
    }

    pub fn run_parallel(values: Vec<T>, workers: usize) -> ScanResult<Self> {
        let started = Instant::now();
        let values = parallel_scan(values, workers)?;
        Ok(Self {
            values,
            workers,
            parallel: workers > 1,
            elapsed: started.elapsed(),
        })
    }
}

/// Element-wise equality against the sequential oracle's output.
pub fn matches_reference<T: PartialEq>(candidate: &[T], reference: &[T]) -> bool {
    candidate.len() == reference.len()
        && candidate.iter().zip(reference.iter()).all(|(a, b)| a == b)
}

/// Scans the store's pristine input sequentially and compares it against
/// the store's working values.
pub fn verify_store<T: ScanElement>(store: &SequenceStore<T>) -> ScanResult<bool> {
    let expected = sequential_scan(store.reference().to_vec())?;
    Ok(matches_reference(store.values(), &expected))
}

/// Sequential-over-parallel wall-time ratio, the figure the benchmark
/// drivers report.
pub fn speedup(sequential: Duration, parallel: Duration) -> f64 {
    let denominator = parallel.as_secs_f64();
    if denominator == 0.0 {
        0.0
    } else {
        sequential.as_secs_f64() / denominator
    }
}
