use num_traits::CheckedAdd;

use crate::error::WorkerError;

/// In-place inclusive scan over one contiguous sub-slice.
///
/// `slice[0]` is the local base case and is left unchanged; every later
/// element becomes the sum of itself and all predecessors within the slice.
/// Single pass, no effect outside the slice, so disjoint partitions can be
/// scanned concurrently without locks. `base` is the slice's offset in the
/// full sequence, used only to report the absolute index of an overflow.
pub(crate) fn local_scan<T>(slice: &mut [T], base: usize) -> Result<(), WorkerError>
where
    T: CheckedAdd + Copy,
{
    for i in 1..slice.len() {
        slice[i] = slice[i - 1]
            .checked_add(&slice[i])
            .ok_or(WorkerError::Overflow { index: base + i })?;
    }
    Ok(())
}

/// Adds the carry received from the predecessor chain to every element of
/// the slice, same overflow policy as `local_scan`.
pub(crate) fn apply_carry<T>(slice: &mut [T], carry: T, base: usize) -> Result<(), WorkerError>
where
    T: CheckedAdd + Copy,
{
    for (offset, value) in slice.iter_mut().enumerate() {
        *value = value
            .checked_add(&carry)
            .ok_or(WorkerError::Overflow { index: base + offset })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_in_place_leaving_the_first_element() {
        let mut values = vec![1_i64, 2, 3, 4];
        local_scan(&mut values, 0).unwrap();
        assert_eq!(values, vec![1, 3, 6, 10]);
    }

    #[test]
    fn empty_and_single_element_slices_are_untouched() {
        let mut empty: Vec<i64> = vec![];
        local_scan(&mut empty, 0).unwrap();
        assert!(empty.is_empty());

        let mut single = vec![9_i64];
        local_scan(&mut single, 3).unwrap();
        assert_eq!(single, vec![9]);
    }

    #[test]
    fn overflow_reports_the_absolute_index() {
        let mut values = vec![i64::MAX, 1];
        let err = local_scan(&mut values, 10).unwrap_err();
        assert_eq!(err, WorkerError::Overflow { index: 11 });
    }

    #[test]
    fn carry_is_added_to_every_element() {
        let mut values = vec![5_i64, 5, 8];
        apply_carry(&mut values, 10, 0).unwrap();
        assert_eq!(values, vec![15, 15, 18]);
    }

    #[test]
    fn carry_overflow_reports_the_absolute_index() {
        let mut values = vec![0_i64, i64::MAX];
        let err = apply_carry(&mut values, 2, 4).unwrap_err();
        assert_eq!(err, WorkerError::Overflow { index: 5 });
    }
}
