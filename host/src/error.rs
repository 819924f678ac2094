//! Errors surfaced by the host binary.

use tessera_board::ConfigError;
use tessera_entity::EntityError;
use tessera_puzzles::PuzzleError;
use tessera_registry::RegistryError;
use thiserror::Error;

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Anything that can stop a host run.
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Puzzle(#[from] PuzzleError),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}
