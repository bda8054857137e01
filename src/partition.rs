//! Partitioning of a sequence into disjoint contiguous ranges.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A half-open index range `[start, end)` assigned to one worker.
///
/// Partitions produced by [`Partition::split`] are disjoint, contiguous and
/// cover the whole sequence. The element at `end` is never part of the
/// partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partition {
    /// First index covered by this partition (inclusive).
    pub start: usize,

    /// First index past the end of this partition (exclusive).
    pub end: usize,
}

impl Partition {
    /// Create a partition covering `[start, end)`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of elements covered by this partition.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if this partition covers no elements.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The covered indices as a standard range, usable for slicing.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Split a sequence of `length` elements into `workers` partitions.
    ///
    /// Every partition except the last covers `length / workers` elements;
    /// the last one additionally absorbs the remainder, so it is the largest
    /// whenever `length` is not an even multiple of `workers`. For example a
    /// length of 11 split across 3 workers yields `[0, 3)`, `[3, 6)` and
    /// `[6, 11)`.
    ///
    /// Callers are expected to pass `2 <= workers <= length`; the container
    /// constructor enforces that bound. Zero workers or a zero length yield
    /// an empty plan.
    pub fn split(length: usize, workers: usize) -> Vec<Partition> {
        if workers == 0 || length == 0 {
            return Vec::new();
        }

        let base = length / workers;
        let mut partitions = Vec::with_capacity(workers);
        for i in 0..workers {
            partitions.push(Partition::new(i * base, (i + 1) * base));
        }

        // The last partition absorbs the division remainder.
        if let Some(last) = partitions.last_mut() {
            last.end = length;
        }

        partitions
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_accessors() {
        let partition = Partition::new(3, 6);
        assert_eq!(partition.len(), 3);
        assert!(!partition.is_empty());
        assert_eq!(partition.range(), 3..6);
        assert_eq!(partition.to_string(), "[3, 6)");

        let empty = Partition::new(4, 4);
        assert_eq!(empty.len(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_split_with_remainder() {
        let partitions = Partition::split(11, 3);
        assert_eq!(
            partitions,
            vec![
                Partition::new(0, 3),
                Partition::new(3, 6),
                Partition::new(6, 11),
            ]
        );
    }

    #[test]
    fn test_split_exact_division() {
        let partitions = Partition::split(12, 4);
        assert_eq!(partitions.len(), 4);
        for (i, partition) in partitions.iter().enumerate() {
            assert_eq!(partition.start, i * 3);
            assert_eq!(partition.end, (i + 1) * 3);
        }
    }

    #[test]
    fn test_split_covers_sequence_without_gaps() {
        for length in 2..=48 {
            for workers in 2..=length {
                let partitions = Partition::split(length, workers);
                assert_eq!(partitions.len(), workers);
                assert_eq!(partitions[0].start, 0);
                assert_eq!(partitions[workers - 1].end, length);

                let base = length / workers;
                for pair in partitions.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start);
                    assert_eq!(pair[0].len(), base);
                }

                let covered: usize = partitions.iter().map(|p| p.len()).sum();
                assert_eq!(covered, length);

                // Only the last partition is allowed to exceed the base size.
                assert!(partitions[workers - 1].len() >= base);
                assert!(partitions[workers - 1].len() < base + workers);
            }
        }
    }

    #[test]
    fn test_split_degenerate_inputs() {
        assert!(Partition::split(0, 3).is_empty());
        assert!(Partition::split(10, 0).is_empty());
    }

    #[test]
    fn test_split_serializes_to_json() {
        let partitions = Partition::split(11, 3);
        let json = serde_json::to_string(&partitions).unwrap();
        let restored: Vec<Partition> = serde_json::from_str(&json).unwrap();
        assert_eq!(partitions, restored);
    }
}
