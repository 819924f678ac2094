//! Tessera Board
//!
//! The board owns the scheduler and exposes one bounded "advance solving"
//! operation to the host. It keeps no registry of entities; the puzzle value
//! it carries wires and owns those.

mod board;
mod config;

pub use board::{Board, Puzzle};
pub use config::{ConfigError, ConfigResult, EngineConfig, HostConfig};
