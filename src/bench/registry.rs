use std::collections::BTreeMap;

use crate::bench::{Algorithm, BenchError, ScapegoatInsert, UnbalancedInsert};

/// Metadata describing a registered algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmInfo {
    /// Registered name
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Registry of algorithms available to the harness, ordered by name.
#[derive(Default)]
pub struct AlgorithmRegistry {
    entries: BTreeMap<&'static str, Box<dyn Algorithm>>,
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

impl AlgorithmRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Registry holding every built-in tree algorithm.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ScapegoatInsert);
        registry.register(UnbalancedInsert);
        registry
    }

    /// Register an algorithm, replacing any previous one with the same name.
    pub fn register<A: Algorithm>(&mut self, algorithm: A) {
        self.entries.insert(algorithm.name(), Box::new(algorithm));
    }

    /// Retrieve an algorithm by name.
    pub fn get(&self, name: &str) -> Option<&dyn Algorithm> {
        self.entries.get(name).map(|entry| entry.as_ref())
    }

    /// Retrieve an algorithm by name, failing with `UnknownAlgorithm`.
    pub fn require(&self, name: &str) -> Result<&dyn Algorithm, BenchError> {
        self.get(name)
            .ok_or_else(|| BenchError::UnknownAlgorithm(name.to_string()))
    }

    /// List all registered algorithms.
    pub fn list(&self) -> Vec<AlgorithmInfo> {
        self.entries
            .values()
            .map(|entry| AlgorithmInfo {
                name: entry.name().to_string(),
                description: entry.description().to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_listed_by_name() {
        let registry = AlgorithmRegistry::with_defaults();
        let names: Vec<_> = registry.list().into_iter().map(|info| info.name).collect();
        assert_eq!(names, vec!["scapegoat", "unbalanced"]);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let registry = AlgorithmRegistry::with_defaults();
        assert!(registry.get("scapegoat").is_some());
        assert!(matches!(
            registry.require("bubble"),
            Err(BenchError::UnknownAlgorithm(name)) if name == "bubble"
        ));
    }
}
