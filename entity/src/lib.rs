//! Tessera Entity
//!
//! Constrained entities that re-evaluate when a neighbour changes.
//!
//! Responsibilities:
//! - Enforce the configure / start lifecycle
//! - Turn neighbour notifications into coalesced scheduled re-evaluations
//! - Run the puzzle-specific constraint hook with read access to neighbours
//! - Fan out the entity's own changes to its subscribers

mod config;
mod constraint;
mod error;
mod lifecycle;
mod world;

pub use config::{LifecyclePolicy, WorldConfig};
pub use constraint::{Constraint, CookiePolicy, Evaluation, Neighbors};
pub use error::{EntityError, EntityResult, LifecycleError, LifecycleResult};
pub use lifecycle::{Lifecycle, LifecycleState};
pub use world::{EntityWorld, Listener};
