//! Position discovery across partitions.

use crate::error::Result;
use crate::ops::PartitionedOp;
use crate::partition::Partition;

/// Finds every position holding a target value.
///
/// Each worker walks its slice with a cursor, resuming just past the previous
/// hit so repeated occurrences are all found. Local positions are shifted by
/// the partition start, which makes them global before the merge ever sees
/// them. Concatenating the partials in partition order therefore yields a
/// strictly ascending position list.
#[derive(Debug)]
pub struct IndexesOp<'a, T> {
    /// Value to locate.
    value: &'a T,
}

impl<'a, T> IndexesOp<'a, T> {
    /// Create an index discovery operation for the given value.
    pub fn new(value: &'a T) -> Self {
        Self { value }
    }
}

impl<T> PartitionedOp<T> for IndexesOp<'_, T>
where
    T: PartialEq + Sync,
{
    type Partial = Vec<usize>;
    type Output = Vec<usize>;

    fn run_partition(&self, partition: &Partition, slice: &[T]) -> Result<Vec<usize>> {
        let mut positions = Vec::new();
        let mut cursor = 0;

        while cursor < slice.len() {
            match slice[cursor..].iter().position(|element| element == self.value) {
                Some(offset) => {
                    let local = cursor + offset;
                    positions.push(partition.start + local);
                    cursor = local + 1;
                }
                None => break,
            }
        }

        Ok(positions)
    }

    fn merge(&self, partials: Vec<Vec<usize>>) -> Result<Vec<usize>> {
        let total: usize = partials.iter().map(Vec::len).sum();
        let mut positions = Vec::with_capacity(total);
        for mut partial in partials {
            positions.append(&mut partial);
        }
        Ok(positions)
    }

    fn name(&self) -> &str {
        "indexes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_repeated_occurrences() {
        let op = IndexesOp::new(&5);
        let slice = [5, 1, 5, 5, 2, 5];

        let positions = op.run_partition(&Partition::new(0, 6), &slice).unwrap();
        assert_eq!(positions, vec![0, 2, 3, 5]);
    }

    #[test]
    fn test_positions_are_globalized_by_partition_start() {
        let op = IndexesOp::new(&9);
        let slice = [1, 9, 9];

        let positions = op.run_partition(&Partition::new(20, 23), &slice).unwrap();
        assert_eq!(positions, vec![21, 22]);
    }

    #[test]
    fn test_absent_value_yields_empty_partial() {
        let op = IndexesOp::new(&42);
        let slice = [1, 2, 3];

        let positions = op.run_partition(&Partition::new(0, 3), &slice).unwrap();
        assert!(positions.is_empty());
    }

    #[test]
    fn test_merge_concatenates_in_partition_order() {
        let op = IndexesOp::new(&0);
        let merged = op
            .merge(vec![vec![0, 3], Vec::new(), vec![7, 8], vec![11]])
            .unwrap();
        assert_eq!(merged, vec![0, 3, 7, 8, 11]);
    }

    #[test]
    fn test_name() {
        let op = IndexesOp::new(&0);
        assert_eq!(op.name(), "indexes");
    }
}
