//! Key set generation
//!
//! Data sets are reproducible: the same kind, size and seed always yield
//! the same keys.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::bench::DatasetKind;
use crate::Key;

/// Generate `size` keys of the given shape.
///
/// `size` must fit in [`Key`]; `BenchConfig::validate` enforces this.
pub fn generate(kind: DatasetKind, size: usize, seed: u64) -> Vec<Key> {
    let upper = Key::try_from(size).unwrap_or(Key::MAX);
    let mut rng = StdRng::seed_from_u64(seed);

    match kind {
        DatasetKind::Unique => {
            let mut keys: Vec<Key> = (0..upper).collect();
            keys.shuffle(&mut rng);
            keys
        }
        DatasetKind::Duplicates if upper == 0 => Vec::new(),
        DatasetKind::Duplicates => (0..size).map(|_| rng.gen_range(0..upper)).collect(),
        DatasetKind::Ascending => (0..upper).collect(),
        DatasetKind::Descending => (0..upper).rev().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn unique_is_a_permutation() {
        let mut keys = generate(DatasetKind::Unique, 1000, 1);
        assert_ne!(keys, (0..1000).collect::<Vec<_>>());
        keys.sort_unstable();
        assert_eq!(keys, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn duplicates_stay_in_range() {
        let keys = generate(DatasetKind::Duplicates, 1000, 1);
        assert_eq!(keys.len(), 1000);
        assert!(keys.iter().all(|&k| (0..1000).contains(&k)));

        let distinct: HashSet<_> = keys.iter().collect();
        assert!(distinct.len() < 1000);
    }

    #[test]
    fn sorted_shapes() {
        assert_eq!(generate(DatasetKind::Ascending, 4, 0), vec![0, 1, 2, 3]);
        assert_eq!(generate(DatasetKind::Descending, 4, 0), vec![3, 2, 1, 0]);
    }

    #[test]
    fn same_seed_same_keys() {
        for kind in DatasetKind::ALL {
            assert_eq!(generate(kind, 256, 42), generate(kind, 256, 42));
        }
        assert_ne!(
            generate(DatasetKind::Unique, 256, 42),
            generate(DatasetKind::Unique, 256, 43)
        );
    }

    #[test]
    fn empty_sets() {
        for kind in DatasetKind::ALL {
            assert!(generate(kind, 0, 0).is_empty());
        }
    }
}
