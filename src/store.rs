use std::ops::Range;

use crate::error::{ScanError, ScanResult};
use crate::{coordinator, metrics, scanner, ScanElement};

/// Owns the working sequence for one run, together with a pristine copy of
/// the input. The working values are rewritten in place by the scans; the
/// reference copy stays untouched so the sequential oracle and `reset` can
/// use it.
#[derive(Debug, Clone)]
pub struct SequenceStore<T> {
    values: Vec<T>,
    reference: Vec<T>,
}

impl<T: Clone> SequenceStore<T> {
    pub fn new(values: Vec<T>) -> Self {
        let reference = values.clone();
        Self { values, reference }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Current working values, scanned or not.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The input as it was handed in.
    pub fn reference(&self) -> &[T] {
        &self.reference
    }

    /// Restores the working values to the pristine input.
    pub fn reset(&mut self) {
        self.values.clone_from(&self.reference);
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

impl<T: ScanElement> SequenceStore<T> {
    /// Sequential in-place scan of the working values.
    pub fn run_sequential(&mut self) -> ScanResult<()> {
        metrics::record_scan(metrics::OPERATION_SCAN, metrics::MODE_SEQUENTIAL);
        scanner::local_scan(&mut self.values, 0)
            .map_err(|source| ScanError::WorkerFailure { pid: 0, source })
    }

    /// Parallel in-place scan of the working values.
    pub fn run_parallel(&mut self, workers: usize) -> ScanResult<()> {
        coordinator::run_parallel(&mut self.values, workers)
    }
}

/// Deterministic partition shapes: `workers` contiguous, gap-free half-open
/// ranges covering `[0, len)`, ordered by worker id. Every partition has
/// `len / workers` elements except the last, which absorbs the remainder.
pub fn partition_ranges(len: usize, workers: usize) -> Vec<Range<usize>> {
    debug_assert!(workers >= 1);
    debug_assert!(workers <= len);
    let chunk = len / workers;
    (0..workers)
        .map(|pid| {
            let start = pid * chunk;
            let end = if pid == workers - 1 {
                len
            } else {
                start + chunk
            };
            start..end
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_cover_the_sequence_without_gaps() {
        for (len, workers) in [(8, 4), (10, 3), (5, 5), (7, 1), (23, 6)] {
            let ranges = partition_ranges(len, workers);
            assert_eq!(ranges.len(), workers);
            assert_eq!(ranges[0].start, 0);
            assert_eq!(ranges[workers - 1].end, len);
            for pair in ranges.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
        }
    }

    #[test]
    fn all_but_last_partition_share_one_size() {
        let ranges = partition_ranges(10, 3);
        assert_eq!(ranges, vec![0..3, 3..6, 6..10]);
    }

    #[test]
    fn eight_elements_four_workers_split_in_pairs() {
        let ranges = partition_ranges(8, 4);
        assert_eq!(ranges, vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn worker_per_element_yields_unit_partitions() {
        let ranges = partition_ranges(4, 4);
        assert!(ranges.iter().all(|range| range.len() == 1));
    }

    #[test]
    fn reset_restores_the_pristine_input() {
        let mut store = SequenceStore::new(vec![3_i64, 1, 4]);
        store.run_sequential().unwrap();
        assert_eq!(store.values(), &[3, 4, 8]);
        store.reset();
        assert_eq!(store.values(), store.reference());
        assert_eq!(store.values(), &[3, 1, 4]);
    }
}
