//! Contiguous partitioning of log lines across workers
//!
//! Lines are split into `workers` contiguous slices of `ceil(len / workers)`
//! lines each; trailing slices hold the remainder and may be empty. Slicing
//! keeps the split O(1) per worker. Boundaries only decide which worker
//! classifies a line and never change the aggregate result.

/// Default number of partitions (and parallel workers)
pub const DEFAULT_WORKERS: usize = 8;

/// Split `items` into exactly `workers` contiguous, disjoint slices
///
/// The slices cover every item exactly once, in original order. A worker
/// count of zero is treated as one.
///
/// # Example
///
/// ```
/// use txnstat::txnlog::partition::partition;
///
/// let lines = [1, 2, 3, 4, 5];
/// let parts = partition(&lines, 3);
/// assert_eq!(parts, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
/// ```
pub fn partition<T>(items: &[T], workers: usize) -> Vec<&[T]> {
    let workers = workers.max(1);
    let chunk = items.len().div_ceil(workers);

    (0..workers)
        .map(|i| {
            let start = (i * chunk).min(items.len());
            let end = (start + chunk).min(items.len());
            &items[start..end]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(parts: &[&[u32]]) -> Vec<u32> {
        parts.iter().flat_map(|p| p.iter().copied()).collect()
    }

    #[test]
    fn test_even_split() {
        let items: Vec<u32> = (0..16).collect();
        let parts = partition(&items, 8);
        assert_eq!(parts.len(), 8);
        assert!(parts.iter().all(|p| p.len() == 2));
        assert_eq!(flatten(&parts), items);
    }

    #[test]
    fn test_remainder_in_tail() {
        let items: Vec<u32> = (0..10).collect();
        let parts = partition(&items, 4);
        let sizes: Vec<usize> = parts.iter().map(|p| p.len()).collect();
        assert_eq!(sizes, vec![3, 3, 3, 1]);
        assert_eq!(flatten(&parts), items);
    }

    #[test]
    fn test_trailing_partitions_may_be_empty() {
        let items: Vec<u32> = (0..10).collect();
        let parts = partition(&items, 8);
        let sizes: Vec<usize> = parts.iter().map(|p| p.len()).collect();
        assert_eq!(sizes, vec![2, 2, 2, 2, 2, 0, 0, 0]);
        assert_eq!(flatten(&parts), items);
    }

    #[test]
    fn test_more_workers_than_items() {
        let items = [7u32, 8, 9];
        let parts = partition(&items, 3);
        assert_eq!(parts, vec![&[7][..], &[8][..], &[9][..]]);
    }

    #[test]
    fn test_empty_input() {
        let items: [u32; 0] = [];
        let parts = partition(&items, 8);
        assert_eq!(parts.len(), 8);
        assert!(parts.iter().all(|p| p.is_empty()));
    }

    #[test]
    fn test_zero_workers_is_one() {
        let items = [1u32, 2, 3];
        let parts = partition(&items, 0);
        assert_eq!(parts, vec![&[1, 2, 3][..]]);
    }

    #[test]
    fn test_covers_every_item_for_any_worker_count() {
        let items: Vec<u32> = (0..103).collect();
        for workers in 1..=20 {
            let parts = partition(&items, workers);
            assert_eq!(parts.len(), workers);
            assert_eq!(flatten(&parts), items, "workers = {}", workers);
        }
    }
}
