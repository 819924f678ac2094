//! Puzzle construction errors.

use tessera_entity::EntityError;
use thiserror::Error;

/// Result type for puzzle construction.
pub type PuzzleResult<T> = Result<T, PuzzleError>;

/// Errors that can occur while building a puzzle.
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("Unsupported size {size}: expected 1..={max}")]
    InvalidSize { size: usize, max: usize },

    #[error("Expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },

    #[error("Invalid symbol '{symbol}' for size {size}")]
    InvalidSymbol { symbol: char, size: usize },

    #[error(transparent)]
    Entity(#[from] EntityError),
}

impl PuzzleError {
    pub fn invalid_size(size: usize, max: usize) -> Self {
        Self::InvalidSize { size, max }
    }

    pub fn cell_count(expected: usize, found: usize) -> Self {
        Self::CellCount { expected, found }
    }

    pub fn invalid_symbol(symbol: char, size: usize) -> Self {
        Self::InvalidSymbol { symbol, size }
    }
}
