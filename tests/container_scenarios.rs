use phalanx::container::{ContainerKind, PartitionedContainer};
use phalanx::error::{PhalanxError, Result};
use phalanx::executor::ExecutorConfig;

#[test]
fn count_sums_partition_tallies() -> Result<()> {
    let container = PartitionedContainer::new(vec![1, 2, 3, 4, 1, 2, 1], 2)?;

    assert_eq!(container.count(&1)?, 3);
    assert_eq!(container.count(&2)?, 2);
    assert_eq!(container.count(&4)?, 1);
    Ok(())
}

#[test]
fn indexes_collates_positions_across_many_workers() -> Result<()> {
    // 99 copies of 0..=10, so the value 10 lands at every 11th position.
    let elements: Vec<i64> = (0..99).flat_map(|_| 0..=10).collect();
    let container = PartitionedContainer::new(elements, 64)?;

    let positions = container.indexes(&10)?;
    let expected: Vec<usize> = (0..99).map(|repeat| 10 + repeat * 11).collect();
    assert_eq!(positions, expected);
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    Ok(())
}

#[test]
fn remove_all_drops_every_listed_value_and_keeps_order() -> Result<()> {
    let container = PartitionedContainer::new(vec![1, 2, 3, 4, 2, 1, 5], 3)?;

    let survivors = container.remove_all(&[1, 2, 5])?;
    assert_eq!(survivors, vec![3, 4]);

    // The backing sequence is untouched.
    assert_eq!(container.as_slice(), &[1, 2, 3, 4, 2, 1, 5]);
    Ok(())
}

#[test]
fn sorted_rebuilds_a_reversed_sequence_in_ascending_order() -> Result<()> {
    let container = PartitionedContainer::new(vec![8, 7, 6, 5, 4, 3, 2, 1], 4)?;
    assert_eq!(container.sorted()?, vec![1, 2, 3, 4, 5, 6, 7, 8]);

    let elements: Vec<i64> = (0..100).rev().collect();
    let container = PartitionedContainer::new(elements, 4)?;
    let expected: Vec<i64> = (0..100).collect();
    assert_eq!(container.sorted()?, expected);
    Ok(())
}

#[test]
fn sorted_handles_sparse_keys() -> Result<()> {
    let container = PartitionedContainer::new(vec![88, 8, 7, 6, 5, 4, 3, 2, 0, 1, 111], 3)?;

    assert_eq!(
        container.sorted()?,
        vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 88, 111]
    );
    Ok(())
}

#[test]
fn sorted_keeps_duplicate_counts() -> Result<()> {
    let container = PartitionedContainer::new(vec![111, -40, 88, -40, 111, 111], 3)?;

    assert_eq!(container.sorted()?, vec![-40, -40, 88, 111, 111, 111]);
    Ok(())
}

#[test]
fn sorting_an_already_sorted_sequence_is_a_no_op() -> Result<()> {
    let elements = vec![1, 1, 2, 3, 5, 8, 13, 21];
    let container = PartitionedContainer::new(elements.clone(), 4)?;

    let sorted = container.sorted()?;
    assert_eq!(sorted, elements);
    assert_eq!(sorted.len(), container.len());
    Ok(())
}

#[test]
fn construction_rejects_invalid_worker_counts() {
    let too_few = PartitionedContainer::new(vec![1, 2, 3], 1);
    assert!(matches!(too_few, Err(PhalanxError::Configuration(_))));

    let too_many = PartitionedContainer::new(vec![1, 2, 3], 4);
    match too_many {
        Err(PhalanxError::Configuration(message)) => {
            assert!(message.contains("exceeds sequence length"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected a configuration error"),
    }
}

#[test]
fn immutable_containers_reject_removal_but_allow_queries() -> Result<()> {
    let container = PartitionedContainer::new_immutable(vec![5, 6, 5, 7, 5, 6], 2)?;
    assert_eq!(container.kind(), ContainerKind::Immutable);

    match container.remove_all(&[5]) {
        Err(PhalanxError::UnsupportedOperation(message)) => {
            assert!(message.contains("mutable"));
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected removal to be rejected"),
    }

    assert_eq!(container.count(&5)?, 3);
    assert_eq!(container.indexes(&6)?, vec![1, 5]);
    assert_eq!(container.sorted()?, vec![5, 5, 5, 6, 6, 7]);
    Ok(())
}

#[test]
fn queries_for_absent_values_return_empty_results() -> Result<()> {
    let container = PartitionedContainer::new(vec![4, 8, 15, 16, 23, 42], 3)?;

    assert_eq!(container.count(&7)?, 0);
    assert!(container.indexes(&7)?.is_empty());
    assert_eq!(container.remove_all(&[99])?, vec![4, 8, 15, 16, 23, 42]);
    Ok(())
}

#[test]
fn two_workers_on_two_elements_is_the_smallest_valid_container() -> Result<()> {
    let container = PartitionedContainer::new(vec![9, 3], 2)?;

    assert_eq!(container.partitions().len(), 2);
    assert_eq!(container.count(&9)?, 1);
    assert_eq!(container.sorted()?, vec![3, 9]);
    Ok(())
}

#[test]
fn worker_count_may_equal_sequence_length() -> Result<()> {
    let container = PartitionedContainer::new(vec![2, 1, 2, 1, 2], 5)?;

    assert_eq!(container.partitions().len(), 5);
    assert!(
        container
            .partitions()
            .iter()
            .all(|partition| partition.len() == 1)
    );
    assert_eq!(container.count(&2)?, 3);
    assert_eq!(container.indexes(&1)?, vec![1, 3]);
    Ok(())
}

#[test]
fn custom_executor_config_is_honored() -> Result<()> {
    let config = ExecutorConfig::default()
        .with_thread_name_prefix("scenario-worker")
        .with_metrics(true);
    let container =
        PartitionedContainer::with_config(vec![7, 7, 1, 7], ContainerKind::Mutable, 2, config)?;

    assert_eq!(container.count(&7)?, 3);

    let metrics = container.metrics();
    assert_eq!(metrics.total_operations, 1);
    assert_eq!(metrics.total_tasks_dispatched, 2);
    Ok(())
}
