//! Splitting output rows between workers.

use std::ops::Range;

/// Half-open interval `[start, end)` of output rows owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Number of workers for `rows` output rows.
///
/// `requested` overrides the hardware parallelism of the rayon pool. The
/// result never exceeds `rows`, so no worker is left without rows, and is
/// at least 1.
pub fn worker_count(rows: usize, requested: Option<usize>) -> usize {
    let natural = requested.unwrap_or_else(rayon::current_num_threads).max(1);
    natural.min(rows).max(1)
}

/// Splits `[0, rows)` into `workers` contiguous ranges of `rows / workers`
/// rows each; the remainder goes to the last range.
///
/// `workers` is clamped to `1..=rows`. Returns no ranges when `rows` is 0.
pub fn partition_rows(rows: usize, workers: usize) -> Vec<RowRange> {
    if rows == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, rows);
    let per_worker = rows / workers;
    (0..workers)
        .map(|i| RowRange {
            start: i * per_worker,
            end: if i + 1 < workers { (i + 1) * per_worker } else { rows },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_partition(rows: usize, workers: usize) {
        let ranges = partition_rows(rows, workers);
        assert_eq!(ranges.len(), workers.clamp(1, rows));
        assert_eq!(ranges.first().map(|r| r.start), Some(0));
        assert_eq!(ranges.last().map(|r| r.end), Some(rows));
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "gap or overlap for {rows} rows / {workers} workers");
        }
        assert!(ranges.iter().all(|r| !r.is_empty()));
        assert_eq!(ranges.iter().map(RowRange::len).sum::<usize>(), rows);
    }

    #[test]
    fn partitions_are_exact() {
        for rows in [1, 2, 3, 17, 4096] {
            for workers in 1..=rows.min(64) {
                assert_exact_partition(rows, workers);
            }
            assert_exact_partition(rows, rows);
        }
    }

    #[test]
    fn remainder_goes_to_last_range() {
        let ranges = partition_rows(17, 4);
        assert_eq!(
            ranges,
            vec![
                RowRange { start: 0, end: 4 },
                RowRange { start: 4, end: 8 },
                RowRange { start: 8, end: 12 },
                RowRange { start: 12, end: 17 },
            ]
        );
    }

    #[test]
    fn too_many_workers_are_clamped() {
        let ranges = partition_rows(3, 16);
        assert_eq!(ranges.len(), 3);
        assert!(ranges.iter().all(|r| r.len() == 1));
        assert!(partition_rows(0, 4).is_empty());
    }

    #[test]
    fn worker_count_bounds() {
        assert_eq!(worker_count(2, Some(8)), 2);
        assert_eq!(worker_count(100, Some(8)), 8);
        assert_eq!(worker_count(100, Some(0)), 1);
        assert_eq!(worker_count(1, None), 1);
        let natural = worker_count(1 << 20, None);
        assert_eq!(natural, rayon::current_num_threads().max(1));
    }
}
