//! Occurrence counting across partitions.

use crate::error::Result;
use crate::ops::PartitionedOp;
use crate::partition::Partition;

/// Counts how many elements equal a target value.
///
/// Each worker counts within its own partition; the merge sums the partial
/// counts. An absent value simply yields zero.
#[derive(Debug)]
pub struct CountOp<'a, T> {
    /// Value to count.
    value: &'a T,
}

impl<'a, T> CountOp<'a, T> {
    /// Create a count operation for the given value.
    pub fn new(value: &'a T) -> Self {
        Self { value }
    }
}

impl<T> PartitionedOp<T> for CountOp<'_, T>
where
    T: PartialEq + Sync,
{
    type Partial = usize;
    type Output = usize;

    fn run_partition(&self, _partition: &Partition, slice: &[T]) -> Result<usize> {
        Ok(slice.iter().filter(|element| *element == self.value).count())
    }

    fn merge(&self, partials: Vec<usize>) -> Result<usize> {
        Ok(partials.into_iter().sum())
    }

    fn name(&self) -> &str {
        "count"
    }
}
