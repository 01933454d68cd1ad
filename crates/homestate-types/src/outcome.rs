//! Result of asking an entity to act.
//!
//! Acting is a selection protocol, not a fallible operation: an entity whose
//! precondition does not hold answers [`ActionOutcome::NotApplicable`] and
//! the caller moves on to another candidate.

use serde::{Deserialize, Serialize};

/// What happened when an entity was asked to act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// The entity changed the world; carries the first-person narration.
    Performed(String),
    /// The entity cannot act right now; try another candidate.
    NotApplicable,
}

impl ActionOutcome {
    /// Whether the world was changed.
    pub const fn is_performed(&self) -> bool {
        matches!(self, Self::Performed(_))
    }

    /// Narration of the performed action, if any.
    pub fn narration(&self) -> Option<&str> {
        match self {
            Self::Performed(text) => Some(text.as_str()),
            Self::NotApplicable => None,
        }
    }

    /// Consume the outcome, yielding the narration if performed.
    pub fn into_narration(self) -> Option<String> {
        match self {
            Self::Performed(text) => Some(text),
            Self::NotApplicable => None,
        }
    }
}
