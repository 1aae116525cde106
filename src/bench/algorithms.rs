use std::time::Instant;

use crate::bench::{Algorithm, BenchError, RunReport};
use crate::{Key, NodeId, ScapegoatTree, SearchTree, TreeError};

/// Scapegoat tree fed one `add` per key.
#[derive(Debug, Default)]
pub struct ScapegoatInsert;

impl Algorithm for ScapegoatInsert {
    fn name(&self) -> &'static str {
        "scapegoat"
    }

    fn description(&self) -> &'static str {
        "Scapegoat tree insertion with amortized subtree rebuilds."
    }

    fn run(&self, keys: &[Key]) -> Result<RunReport, BenchError> {
        let mut tree = ScapegoatTree::with_capacity(keys.len());

        let start = Instant::now();
        let duplicates = insert_all(keys, |key| tree.add(key))?;
        let elapsed = start.elapsed();

        verify(self.name(), tree.as_search_tree(), keys)?;

        Ok(RunReport {
            algorithm: self.name(),
            keys: keys.len(),
            size: tree.size(),
            duplicates,
            max_depth: tree.max_depth(),
            height: tree.height(),
            rebuilds: tree.rebuilds(),
            elapsed,
        })
    }
}

/// Plain unbalanced BST fed one `insert` per key.
///
/// Sorted inputs degenerate into a chain; quadratic time.
#[derive(Debug, Default)]
pub struct UnbalancedInsert;

impl Algorithm for UnbalancedInsert {
    fn name(&self) -> &'static str {
        "unbalanced"
    }

    fn description(&self) -> &'static str {
        "Unbalanced binary search tree insertion (no rebalancing)."
    }

    fn run(&self, keys: &[Key]) -> Result<RunReport, BenchError> {
        let mut tree = SearchTree::with_capacity(keys.len());

        let start = Instant::now();
        let duplicates = insert_all(keys, |key| tree.insert(key).map(|(id, _)| id))?;
        let elapsed = start.elapsed();

        verify(self.name(), &tree, keys)?;

        Ok(RunReport {
            algorithm: self.name(),
            keys: keys.len(),
            size: tree.size(),
            duplicates,
            max_depth: tree.max_depth(),
            height: tree.height(),
            rebuilds: 0,
            elapsed,
        })
    }
}

/// Feed every key to `insert`, counting rejected duplicates.
fn insert_all<F>(keys: &[Key], mut insert: F) -> Result<usize, BenchError>
where
    F: FnMut(Key) -> Result<NodeId, TreeError>,
{
    let mut duplicates = 0;
    for &key in keys {
        match insert(key) {
            Ok(_) => {}
            Err(TreeError::DuplicateKey(_)) => duplicates += 1,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(duplicates)
}

/// Post-run checks: invariants hold, every offered key is findable and the
/// in-order walk is strictly ascending.
fn verify(algorithm: &'static str, tree: &SearchTree, keys: &[Key]) -> Result<(), BenchError> {
    tree.validate()
        .map_err(|err| BenchError::validation(algorithm, err.to_string()))?;

    if let Some(&missing) = keys.iter().find(|&&key| !tree.contains(key)) {
        return Err(BenchError::validation(
            algorithm,
            format!("key {} not found after insertion", missing),
        ));
    }

    let sorted = tree.keys();
    if let Some(pair) = sorted.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(BenchError::validation(
            algorithm,
            format!("in-order keys out of order: {} then {}", pair[0], pair[1]),
        ));
    }
    if sorted.len() != tree.size() {
        return Err(BenchError::validation(
            algorithm,
            format!("size {} but {} keys in order", tree.size(), sorted.len()),
        ));
    }

    Ok(())
}
