//! Tessera Host
//!
//! Drives a board in timed batches and renders the result:
//!
//! - `host_loop`: work/sleep batching until solved, stalled or interrupted
//! - `format`: grid rendering through the strategy registry
//! - `error`: errors surfaced by the `tessera` binary

mod error;
mod format;
mod host_loop;

pub use error::{HostError, HostResult};
pub use format::{cell_renderers, format_chain, format_square, CellRenderer, RunReport};
pub use host_loop::{HostLoop, HostOutcome, HostSummary};
