//! The configure / start / solved / static state machine.

use std::fmt;

use crate::error::{LifecycleError, LifecycleResult};

/// Coarse position of an entity in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Constructed, not yet wired.
    Uninitialized,
    /// Wired to its neighbours; notifications are still dropped.
    Configured,
    /// Notifications schedule re-evaluation.
    Started,
    /// Settled for good; notifications are dropped.
    Static,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Uninitialized => write!(f, "uninitialized"),
            LifecycleState::Configured => write!(f, "configured"),
            LifecycleState::Started => write!(f, "started"),
            LifecycleState::Static => write!(f, "static"),
        }
    }
}

/// Lifecycle flags of one entity.
///
/// `configured` and `started` are set once and never cleared. `solved` and
/// `static` are only set after starting, by the entity's own constraint
/// hook. A solved entity still passes changes on; a static one ignores
/// notifications but can still be read by neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifecycle {
    configured: bool,
    started: bool,
    solved: bool,
    is_static: bool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the entity as wired. Repeating it is harmless.
    pub fn configure(&mut self) {
        self.configured = true;
    }

    /// Configured → Started, exactly once.
    pub fn start(&mut self) -> LifecycleResult<()> {
        if !self.configured {
            return Err(LifecycleError::NotConfigured);
        }
        if self.started {
            return Err(LifecycleError::AlreadyStarted);
        }
        self.started = true;
        Ok(())
    }

    pub fn require_started(&self) -> LifecycleResult<()> {
        if self.started {
            Ok(())
        } else {
            Err(LifecycleError::NotStarted)
        }
    }

    pub fn mark_solved(&mut self) -> LifecycleResult<()> {
        self.require_started()?;
        self.solved = true;
        Ok(())
    }

    pub fn mark_static(&mut self) -> LifecycleResult<()> {
        self.require_started()?;
        self.is_static = true;
        Ok(())
    }

    /// Set the solved flag on an entity known to be started.
    pub(crate) fn set_solved(&mut self) {
        debug_assert!(self.started, "solved flag set on unstarted entity");
        self.solved = true;
    }

    /// Set the static flag on an entity known to be started.
    pub(crate) fn set_static(&mut self) {
        debug_assert!(self.started, "static flag set on unstarted entity");
        self.is_static = true;
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Returns true if a notification would schedule work.
    pub fn accepts_notifications(&self) -> bool {
        self.started && !self.is_static
    }

    pub fn state(&self) -> LifecycleState {
        if self.is_static {
            LifecycleState::Static
        } else if self.started {
            LifecycleState::Started
        } else if self.configured {
            LifecycleState::Configured
        } else {
            LifecycleState::Uninitialized
        }
    }
}
