use ahash::AHashSet;
use phalanx::container::PartitionedContainer;
use phalanx::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate(seed: u64, size: usize, min_value: i64, max_value: i64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
        .map(|_| rng.random_range(min_value..=max_value))
        .collect()
}

#[test]
fn parallel_results_match_sequential_baselines() -> Result<()> {
    let data = generate(42, 1000, 5, 15);
    let target = 10;

    let expected_count = data.iter().filter(|element| **element == target).count();
    let expected_positions: Vec<usize> = data
        .iter()
        .enumerate()
        .filter_map(|(index, element)| (*element == target).then_some(index))
        .collect();
    let removals: AHashSet<i64> = [9, 10, 11].into_iter().collect();
    let expected_survivors: Vec<i64> = data
        .iter()
        .copied()
        .filter(|element| !removals.contains(element))
        .collect();
    let mut expected_sorted = data.clone();
    expected_sorted.sort_unstable();

    for workers in [2, 3, 7, 16, 100, 1000] {
        let container = PartitionedContainer::new(data.clone(), workers)?;
        assert_eq!(container.count(&target)?, expected_count);
        assert_eq!(container.indexes(&target)?, expected_positions);
        assert_eq!(container.remove_all(&[9, 10, 11])?, expected_survivors);
        assert_eq!(container.sorted()?, expected_sorted);
    }
    Ok(())
}

#[test]
fn heavy_duplication_stays_equivalent() -> Result<()> {
    // A narrow value range makes every partition full of repeats.
    let data = generate(7, 512, 0, 3);

    for workers in [2, 8, 64] {
        let container = PartitionedContainer::new(data.clone(), workers)?;

        for value in 0..=3 {
            let expected = data.iter().filter(|element| **element == value).count();
            assert_eq!(container.count(&value)?, expected);
        }

        let mut expected_sorted = data.clone();
        expected_sorted.sort_unstable();
        assert_eq!(container.sorted()?, expected_sorted);
    }
    Ok(())
}

#[test]
fn larger_sequences_stay_equivalent() -> Result<()> {
    let data = generate(1234, 20_000, -50, 50);
    let container = PartitionedContainer::new(data.clone(), 32)?;

    let target = 0;
    let expected_count = data.iter().filter(|element| **element == target).count();
    assert_eq!(container.count(&target)?, expected_count);

    let positions = container.indexes(&target)?;
    assert_eq!(positions.len(), expected_count);
    assert!(positions.iter().all(|position| data[*position] == target));
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

    let survivors = container.remove_all(&[target])?;
    assert_eq!(survivors.len(), data.len() - expected_count);
    assert!(survivors.iter().all(|element| *element != target));

    let mut expected_sorted = data;
    expected_sorted.sort_unstable();
    assert_eq!(container.sorted()?, expected_sorted);
    Ok(())
}
