//! Tessera Puzzles
//!
//! Small puzzles that exercise the engine end to end:
//! - `chain`: a value relayed down a line of links
//! - `latin`: an N×N Latin square solved by candidate elimination

pub mod chain;
mod error;
pub mod latin;

pub use chain::{Link, RelayChain};
pub use error::{PuzzleError, PuzzleResult};
pub use latin::{Cell, LatinSquare, MAX_SIZE};
