//! Deferred units of work.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Cookie, EntityId};

/// Urgency of a pending command. Higher values run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub i32);

impl Priority {
    /// Priority used for ordinary constraint re-evaluation.
    pub const NEUTRAL: Priority = Priority(50);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub fn raw(&self) -> i32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Which entity hook a command invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hook {
    /// Re-evaluate the entity's constraints.
    ApplyConstraints,
    /// Puzzle-defined hook, identified by a tag the entity understands.
    Custom(u16),
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::ApplyConstraints => write!(f, "apply_constraints"),
            Hook::Custom(tag) => write!(f, "custom[{}]", tag),
        }
    }
}

/// A pending invocation of `hook` on `target`, carrying `cookie`.
///
/// Two commands are the same pending work when all three fields match; the
/// priority they were pushed at is tracked by the scheduler, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command {
    pub target: EntityId,
    pub hook: Hook,
    pub cookie: Cookie,
}

impl Command {
    /// Create a new command.
    pub fn new(target: EntityId, hook: Hook, cookie: Cookie) -> Self {
        Self {
            target,
            hook,
            cookie,
        }
    }

    /// Create a constraint re-evaluation command.
    pub fn apply(target: EntityId, cookie: Cookie) -> Self {
        Self::new(target, Hook::ApplyConstraints, cookie)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}({})", self.target, self.hook, self.cookie)
    }
}
