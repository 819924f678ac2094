//! The StrategyRegistry - immutable strategy lookup.

use std::collections::HashMap;

use crate::{RegistryError, RegistryResult, StrategyKey};

/// Runtime lookup of presentation strategies.
/// It is immutable after construction.
#[derive(Debug)]
pub struct StrategyRegistry<S> {
    strategies: HashMap<StrategyKey, S>,
}

impl<S> StrategyRegistry<S> {
    pub(crate) fn new(strategies: HashMap<StrategyKey, S>) -> Self {
        Self { strategies }
    }

    /// Get the strategy for a kind and variant.
    pub fn lookup(&self, kind: &str, variant: Option<&str>) -> Option<&S> {
        self.strategies.get(&StrategyKey::new(kind, variant))
    }

    /// Like `lookup`, but a missing strategy is an error.
    pub fn resolve(&self, kind: &str, variant: Option<&str>) -> RegistryResult<&S> {
        let key = StrategyKey::new(kind, variant);
        self.strategies
            .get(&key)
            .ok_or(RegistryError::MissingStrategy(key))
    }

    /// All registered keys, sorted.
    pub fn keys(&self) -> Vec<&StrategyKey> {
        let mut keys: Vec<_> = self.strategies.keys().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
