//! Tessera Registry
//!
//! Maps (entity kind, variant tag) pairs to presentation strategies, such as
//! a renderer for a cell. The host builds one registry and passes it to
//! whatever draws the puzzle; there is no global registration.

mod builder;
mod registry;
mod types;

pub use builder::{RegistryError, RegistryResult, StrategyRegistryBuilder};
pub use registry::StrategyRegistry;
pub use types::StrategyKey;
