//! Entity error types.

use tessera_core::EntityId;
use thiserror::Error;

/// Result type for lifecycle transitions.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// A lifecycle transition attempted from a state that does not allow it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Object started before configuring")]
    NotConfigured,

    #[error("Object already started")]
    AlreadyStarted,

    #[error("Object used before starting")]
    NotStarted,
}

/// Result type for entity operations.
pub type EntityResult<T> = Result<T, EntityError>;

/// Errors that can occur while wiring or evaluating entities.
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("Lifecycle violation on {entity}: {source}")]
    Lifecycle {
        entity: EntityId,
        #[source]
        source: LifecycleError,
    },

    #[error("Unknown entity: {0}")]
    UnknownEntity(EntityId),

    #[error("Entity {entity} has no hook with tag {tag}")]
    UnknownHook { entity: EntityId, tag: u16 },

    #[error("Constraint evaluation failed on {entity}: {message}")]
    ConstraintFailed { entity: EntityId, message: String },
}

impl EntityError {
    pub fn lifecycle(entity: EntityId, source: LifecycleError) -> Self {
        Self::Lifecycle { entity, source }
    }

    pub fn unknown_hook(entity: EntityId, tag: u16) -> Self {
        Self::UnknownHook { entity, tag }
    }

    pub fn constraint_failed(entity: EntityId, message: impl Into<String>) -> Self {
        Self::ConstraintFailed {
            entity,
            message: message.into(),
        }
    }

    /// The lifecycle violation, if this is one.
    pub fn as_lifecycle(&self) -> Option<LifecycleError> {
        match self {
            Self::Lifecycle { source, .. } => Some(*source),
            _ => None,
        }
    }
}
