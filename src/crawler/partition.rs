//! Static work partitioning
//!
//! Both the fetch engine and the extraction coordinator split their input
//! into contiguous, non-overlapping slices, one per worker, computed up front.
//! There is no work stealing.

use std::ops::Range;

/// Returns the slice of `len` items assigned to `worker` out of `workers`
///
/// With `base = len / workers` and `rem = len % workers`:
/// - `rem == 0`: every worker gets `base` items.
/// - `base == 0`: the first `len` workers get one item each, the rest none.
/// - otherwise the first `rem` workers get `base + 1` items and the rest `base`.
///
/// Idle workers receive an empty range.
///
/// # Examples
///
/// ```
/// use wiki_corpus::crawler::chunk_bounds;
///
/// assert_eq!(chunk_bounds(10, 0, 3), 0..4);
/// assert_eq!(chunk_bounds(10, 1, 3), 4..7);
/// assert_eq!(chunk_bounds(10, 2, 3), 7..10);
/// assert!(chunk_bounds(2, 4, 5).is_empty());
/// ```
pub fn chunk_bounds(len: usize, worker: usize, workers: usize) -> Range<usize> {
    let workers = workers.max(1);
    let base = len / workers;
    let rem = len % workers;

    if rem == 0 {
        let lower = worker * base;
        lower..lower + base
    } else if base == 0 {
        if worker >= len {
            len..len
        } else {
            worker..worker + 1
        }
    } else if worker < rem {
        let lower = worker * (base + 1);
        lower..lower + base + 1
    } else {
        let lower = rem * (base + 1) + (worker - rem) * base;
        lower..lower + base
    }
}

/// Splits `items` into exactly `workers` contiguous slices
///
/// Concatenating the slices in worker order reproduces `items`.
pub fn partition<T>(items: &[T], workers: usize) -> Vec<&[T]> {
    let workers = workers.max(1);
    (0..workers)
        .map(|worker| &items[chunk_bounds(items.len(), worker, workers)])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uneven_split() {
        let bounds: Vec<_> = (0..3).map(|w| chunk_bounds(10, w, 3)).collect();
        assert_eq!(bounds, vec![0..4, 4..7, 7..10]);
    }

    #[test]
    fn test_fewer_items_than_workers() {
        let bounds: Vec<_> = (0..5).map(|w| chunk_bounds(2, w, 5)).collect();
        assert_eq!(bounds[0], 0..1);
        assert_eq!(bounds[1], 1..2);
        assert!(bounds[2..].iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_even_split() {
        let bounds: Vec<_> = (0..4).map(|w| chunk_bounds(8, w, 4)).collect();
        assert_eq!(bounds, vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<u32> = Vec::new();
        let slices = partition(&items, 4);
        assert_eq!(slices.len(), 4);
        assert!(slices.iter().all(|s| s.is_empty()));
    }

    #[test]
    fn test_partition_reconstructs_input() {
        for len in 0..40 {
            let items: Vec<usize> = (0..len).collect();
            for workers in 1..12 {
                let slices = partition(&items, workers);
                assert_eq!(slices.len(), workers);

                let joined: Vec<usize> = slices.concat();
                assert_eq!(joined, items, "len={} workers={}", len, workers);

                // Sizes differ by at most one, larger slices first
                let sizes: Vec<usize> = slices.iter().map(|s| s.len()).collect();
                let max = sizes.iter().copied().max().unwrap_or(0);
                let min = sizes.iter().copied().min().unwrap_or(0);
                assert!(max - min <= 1);
                assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
            }
        }
    }

    #[test]
    fn test_zero_workers_treated_as_one() {
        let items = [1, 2, 3];
        let slices = partition(&items, 0);
        assert_eq!(slices, vec![&items[..]]);
    }
}
