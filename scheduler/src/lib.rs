//! Tessera Scheduler
//!
//! Holds deferred commands keyed by priority and drains them under a budget.
//!
//! Responsibilities:
//! - Coalesce duplicate pending commands per priority
//! - Run the most urgent command first
//! - Stop draining at the fixed point or when the budget runs out
//! - Hand control back to the host between batches

mod budget;
mod scheduler;

pub use budget::{DrainBudget, DrainReport, StopReason};
pub use scheduler::{Dispatch, Scheduler};
