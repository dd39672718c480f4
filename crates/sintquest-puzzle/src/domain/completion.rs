//! Two-party completion status.

use serde::Serialize;

/// How many of the two completion markers are alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    /// Neither player has authenticated recently.
    None,
    /// Exactly one player has.
    Partial,
    /// Both have.
    Complete,
}

impl CompletionStatus {
    /// Classifies two marker presences. The argument order does not matter.
    #[must_use]
    pub fn classify(first: bool, second: bool) -> Self {
        match (first, second) {
            (false, false) => Self::None,
            (true, true) => Self::Complete,
            _ => Self::Partial,
        }
    }
}
