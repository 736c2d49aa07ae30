use std::mem;
use std::thread;

use crate::error::{ScanError, ScanResult, WorkerError};
use crate::handoff::{carry_channel, CarryReceiver, CarrySender};
use crate::store::partition_ranges;
use crate::{metrics, scanner, ScanElement};

/// Runs the chained-carry parallel scan in place.
///
/// Partitions the buffer into disjoint `&mut` slices, spawns one scoped OS
/// thread per partition, and wires worker `pid` to carry channel `pid - 1`
/// (receive side) and `pid` (send side). There are exactly `workers - 1`
/// channels: the first worker never awaits and the last never publishes.
/// All workers are joined before returning; if any failed, the first
/// failure in partition order is reported and the buffer contents are
/// unspecified.
pub(crate) fn run_parallel<T: ScanElement>(values: &mut [T], workers: usize) -> ScanResult<()> {
    if workers == 0 {
        return Err(ScanError::InvalidConfiguration {
            workers,
            len: values.len(),
        });
    }
    // An empty input is trivially complete, not a configuration error.
    if values.is_empty() {
        return Ok(());
    }
    if workers > values.len() {
        return Err(ScanError::InvalidConfiguration {
            workers,
            len: values.len(),
        });
    }
    metrics::record_scan(metrics::OPERATION_SCAN, metrics::MODE_PARALLEL);

    let ranges = partition_ranges(values.len(), workers);

    // Channel k sits on the boundary between workers k and k + 1.
    let mut senders: Vec<Option<CarrySender<T>>> = Vec::with_capacity(workers);
    let mut receivers: Vec<Option<CarryReceiver<T>>> = Vec::with_capacity(workers);
    receivers.push(None);
    for _ in 0..workers - 1 {
        let (sender, receiver) = carry_channel();
        senders.push(Some(sender));
        receivers.push(Some(receiver));
    }
    senders.push(None);

    // Disjoint mutable partition slices; non-overlap is enforced by the
    // borrow checker rather than by locking the sequence.
    let mut slices: Vec<&mut [T]> = Vec::with_capacity(workers);
    let mut rest = values;
    for range in &ranges {
        let (head, tail) = mem::take(&mut rest).split_at_mut(range.len());
        slices.push(head);
        rest = tail;
    }

    let mut failures: Vec<(usize, WorkerError)> = Vec::new();
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers);
        for (pid, ((slice, prev), next)) in slices
            .into_iter()
            .zip(receivers)
            .zip(senders)
            .enumerate()
        {
            let base = ranges[pid].start;
            handles.push(scope.spawn(move || worker(pid, base, slice, prev, next)));
        }
        for (pid, handle) in handles.into_iter().enumerate() {
            let outcome = match handle.join() {
                Ok(result) => result,
                Err(_) => Err(WorkerError::Panicked),
            };
            if let Err(source) = outcome {
                failures.push((pid, source));
            }
        }
    });

    match failures.into_iter().next() {
        None => Ok(()),
        Some((pid, source)) => Err(ScanError::WorkerFailure { pid, source }),
    }
}

/// One worker: local scan, await the predecessor carry, publish downstream
/// as soon as the outgoing carry is known, then apply the received carry to
/// the own partition. The publish is ordered before the carry application.
fn worker<T: ScanElement>(
    pid: usize,
    base: usize,
    slice: &mut [T],
    prev: Option<CarryReceiver<T>>,
    next: Option<CarrySender<T>>,
) -> Result<(), WorkerError> {
    scanner::local_scan(slice, base)?;

    let carried = match prev {
        Some(receiver) => receiver
            .await_value()
            .map_err(|_| WorkerError::CarryUnavailable { boundary: pid - 1 })?,
        None => T::zero(),
    };

    if let Some(sender) = next {
        // Partitions are non-empty whenever workers <= len.
        let last = slice[slice.len() - 1];
        let total = carried.checked_add(&last).ok_or(WorkerError::Overflow {
            index: base + slice.len() - 1,
        })?;
        sender.publish(total);
    }

    if pid > 0 {
        scanner::apply_carry(slice, carried, base)?;
    }
    Ok(())
}
