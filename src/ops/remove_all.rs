//! Bulk value removal across partitions.

use std::hash::Hash;

use ahash::AHashSet;

use crate::error::Result;
use crate::ops::PartitionedOp;
use crate::partition::Partition;

/// Removes every occurrence of a set of values.
///
/// Each worker filters its slice against the removal set and keeps the
/// survivors in their original relative order. The merge concatenates the
/// survivor runs in partition order, so the output reads exactly like the
/// input with the removed values deleted in place.
#[derive(Debug)]
pub struct RemoveAllOp<T> {
    /// Values to remove.
    values: AHashSet<T>,
}

impl<T> RemoveAllOp<T>
where
    T: Eq + Hash,
{
    /// Create a removal operation for the given values.
    pub fn new<I: IntoIterator<Item = T>>(values: I) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl<T> PartitionedOp<T> for RemoveAllOp<T>
where
    T: Eq + Hash + Clone + Send + Sync,
{
    type Partial = Vec<T>;
    type Output = Vec<T>;

    fn run_partition(&self, _partition: &Partition, slice: &[T]) -> Result<Vec<T>> {
        Ok(slice
            .iter()
            .filter(|element| !self.values.contains(*element))
            .cloned()
            .collect())
    }

    fn merge(&self, partials: Vec<Vec<T>>) -> Result<Vec<T>> {
        let total: usize = partials.iter().map(Vec::len).sum();
        let mut survivors = Vec::with_capacity(total);
        for mut partial in partials {
            survivors.append(&mut partial);
        }
        Ok(survivors)
    }

    fn name(&self) -> &str {
        "remove_all"
    }
}
