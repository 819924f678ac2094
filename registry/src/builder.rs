//! StrategyRegistryBuilder for constructing an immutable StrategyRegistry.

use std::collections::HashMap;

use thiserror::Error;

use crate::{StrategyKey, StrategyRegistry};

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur while building or querying a registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Duplicate strategy for {0}")]
    DuplicateStrategy(StrategyKey),

    #[error("No strategy registered for {0}")]
    MissingStrategy(StrategyKey),
}

/// Builder for constructing an immutable StrategyRegistry.
#[derive(Debug)]
pub struct StrategyRegistryBuilder<S> {
    strategies: HashMap<StrategyKey, S>,
}

impl<S> Default for StrategyRegistryBuilder<S> {
    fn default() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }
}

impl<S> StrategyRegistryBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `strategy` for one kind and variant.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        variant: Option<&str>,
        strategy: S,
    ) -> RegistryResult<&mut Self> {
        let key = StrategyKey::new(kind, variant);
        if self.strategies.contains_key(&key) {
            return Err(RegistryError::DuplicateStrategy(key));
        }
        self.strategies.insert(key, strategy);
        Ok(self)
    }

    /// Register the default presentation of `kind`.
    pub fn register_default(&mut self, kind: impl Into<String>, strategy: S) -> RegistryResult<&mut Self> {
        self.register(kind, None, strategy)
    }

    /// Build the immutable registry.
    pub fn build(self) -> StrategyRegistry<S> {
        StrategyRegistry::new(self.strategies)
    }
}

impl<S: Clone> StrategyRegistryBuilder<S> {
    /// Register one strategy for several kinds at once.
    pub fn register_many<'k>(
        &mut self,
        kinds: impl IntoIterator<Item = &'k str>,
        variant: Option<&str>,
        strategy: S,
    ) -> RegistryResult<&mut Self> {
        for kind in kinds {
            self.register(kind, variant, strategy.clone())?;
        }
        Ok(self)
    }
}
