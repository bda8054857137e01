//! Distributed counting sort across partitions.

use std::hash::Hash;
use std::iter::repeat_n;

use ahash::AHashMap;

use crate::error::Result;
use crate::ops::PartitionedOp;
use crate::partition::Partition;

/// Sorts the sequence ascending via per-partition histograms.
///
/// Each worker builds an occurrence histogram of its slice. The merge sums
/// the histograms key by key, then replays the keys in ascending order,
/// emitting each value as many times as it occurred. Values absent from the
/// sequence never appear in any histogram, so gaps in the value range cost
/// nothing.
#[derive(Debug, Default)]
pub struct SortOp;

impl SortOp {
    /// Create a sort operation.
    pub fn new() -> Self {
        Self
    }
}

impl<T> PartitionedOp<T> for SortOp
where
    T: Ord + Hash + Clone + Send + Sync,
{
    type Partial = AHashMap<T, usize>;
    type Output = Vec<T>;

    fn run_partition(&self, _partition: &Partition, slice: &[T]) -> Result<AHashMap<T, usize>> {
        let mut histogram = AHashMap::new();
        for element in slice {
            *histogram.entry(element.clone()).or_insert(0) += 1;
        }
        Ok(histogram)
    }

    fn merge(&self, partials: Vec<AHashMap<T, usize>>) -> Result<Vec<T>> {
        let mut totals: AHashMap<T, usize> = AHashMap::new();
        let mut total_len = 0;
        for histogram in partials {
            for (value, count) in histogram {
                total_len += count;
                *totals.entry(value).or_insert(0) += count;
            }
        }

        // Histogram keys carry no order; sort them before the replay.
        let mut pairs: Vec<(T, usize)> = totals.into_iter().collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let mut sorted = Vec::with_capacity(total_len);
        for (value, count) in pairs {
            sorted.extend(repeat_n(value, count));
        }
        Ok(sorted)
    }

    fn name(&self) -> &str {
        "sort"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_occurrences() {
        let op = SortOp::new();
        let slice = [4, 2, 4, 4, 9];

        let histogram = op.run_partition(&Partition::new(0, 5), &slice).unwrap();
        assert_eq!(histogram.get(&4), Some(&3));
        assert_eq!(histogram.get(&2), Some(&1));
        assert_eq!(histogram.get(&9), Some(&1));
        assert_eq!(histogram.get(&7), None);
    }

    #[test]
    fn test_merge_sums_histograms_and_replays_ascending() {
        let op = SortOp::new();

        let mut first = AHashMap::new();
        first.insert(5, 2);
        first.insert(1, 1);
        let mut second = AHashMap::new();
        second.insert(5, 1);
        second.insert(3, 2);

        let sorted = op.merge(vec![first, second]).unwrap();
        assert_eq!(sorted, vec![1, 3, 3, 5, 5, 5]);
    }

    #[test]
    fn test_merge_handles_sparse_value_range() {
        let op = SortOp::new();

        let mut histogram = AHashMap::new();
        histogram.insert(111, 1);
        histogram.insert(-40, 2);
        histogram.insert(88, 1);

        let sorted = op.merge(vec![histogram]).unwrap();
        assert_eq!(sorted, vec![-40, -40, 88, 111]);
    }

    #[test]
    fn test_merge_with_no_partials() {
        let op = SortOp::new();
        let sorted: Vec<i32> = op.merge(Vec::new()).unwrap();
        assert!(sorted.is_empty());
    }

    #[test]
    fn test_name() {
        let op = SortOp::new();
        assert_eq!(PartitionedOp::<i32>::name(&op), "sort");
    }
}
