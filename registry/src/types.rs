//! Registry keys.

use std::fmt;

/// Identifies which strategy presents an entity.
///
/// `variant` distinguishes several presentations of the same kind of
/// entity; `None` is the default presentation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrategyKey {
    pub kind: String,
    pub variant: Option<String>,
}

impl StrategyKey {
    pub fn new(kind: impl Into<String>, variant: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            variant: variant.map(str::to_string),
        }
    }

    /// Key for the default presentation of `kind`.
    pub fn default_for(kind: impl Into<String>) -> Self {
        Self::new(kind, None)
    }
}

impl fmt::Display for StrategyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant {
            Some(variant) => write!(f, "{}/{}", self.kind, variant),
            None => write!(f, "{}", self.kind),
        }
    }
}
