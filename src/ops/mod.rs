//! Divide-and-conquer operations over container partitions.
//!
//! Every operation follows the same two-phase shape: a per-partition step
//! executed by one worker against its own slice, and a single-threaded merge
//! that combines the partial outputs. Partials always arrive at the merge in
//! partition order, so merges that concatenate preserve the original element
//! order without any extra bookkeeping.

pub mod count;
pub mod indexes;
pub mod remove_all;
pub mod sort;

pub use count::CountOp;
pub use indexes::IndexesOp;
pub use remove_all::RemoveAllOp;
pub use sort::SortOp;

use crate::error::Result;
use crate::partition::Partition;

/// Trait for operations that split across partitions and merge back.
pub trait PartitionedOp<T>: Send + Sync {
    /// Output produced from a single partition.
    type Partial: Send;

    /// Final output assembled from all partials.
    type Output;

    /// Process one partition. `slice` covers exactly the partition's range
    /// and nothing else; implementations never see the rest of the sequence.
    fn run_partition(&self, partition: &Partition, slice: &[T]) -> Result<Self::Partial>;

    /// Combine the per-partition outputs, given in partition order.
    fn merge(&self, partials: Vec<Self::Partial>) -> Result<Self::Output>;

    /// Get the name of this operation.
    fn name(&self) -> &str;
}
