//! Configuration for an entity world.

use serde::{Deserialize, Serialize};
use tessera_core::Priority;

/// What happens when wiring code breaks the lifecycle contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePolicy {
    /// Panic with the violation.
    FailFast,
    /// Return the violation as an error.
    Report,
}

impl Default for LifecyclePolicy {
    /// Fail fast in debug builds, report in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            LifecyclePolicy::FailFast
        } else {
            LifecyclePolicy::Report
        }
    }
}

/// Configuration for an [`EntityWorld`](crate::EntityWorld).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Priority at which notifications schedule re-evaluation.
    pub notification_priority: Priority,
    /// Handling of lifecycle violations.
    pub lifecycle_policy: LifecyclePolicy,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            notification_priority: Priority::NEUTRAL,
            lifecycle_policy: LifecyclePolicy::default(),
        }
    }
}

impl WorldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notification_priority(mut self, priority: Priority) -> Self {
        self.notification_priority = priority;
        self
    }

    pub fn with_lifecycle_policy(mut self, policy: LifecyclePolicy) -> Self {
        self.lifecycle_policy = policy;
        self
    }

    /// Configuration that returns lifecycle violations instead of panicking.
    pub fn reporting() -> Self {
        Self::default().with_lifecycle_policy(LifecyclePolicy::Report)
    }
}
