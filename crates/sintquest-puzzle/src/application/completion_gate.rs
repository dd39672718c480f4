//! The two-party completion gate.
//!
//! A pure read-then-classify query, re-evaluated on every poll. The two
//! markers are read independently; a marker that lapses between the two
//! reads yields a transient `Partial`, which is accepted.

use sintquest_core::error::DomainError;
use sintquest_core::store::KeyValueStore;
use tracing::debug;

use crate::domain::answer_book::AnswerBook;
use crate::domain::completion::CompletionStatus;
use crate::domain::roles::Role;

/// Classifies the puzzle as none/partial/complete from the two markers.
#[derive(Debug, Clone)]
pub struct CompletionGate {
    marker_keys: [String; 2],
}

impl CompletionGate {
    /// A gate over the two codeword markers of `book`.
    #[must_use]
    pub fn new(book: &AnswerBook) -> Self {
        Self {
            marker_keys: Role::ALL.map(|role| book.codeword(role).to_owned()),
        }
    }

    /// The marker keys, in role order.
    #[must_use]
    pub fn marker_keys(&self) -> &[String; 2] {
        &self.marker_keys
    }

    /// Reads both markers and classifies.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if either read fails.
    pub async fn status(&self, store: &dyn KeyValueStore) -> Result<CompletionStatus, DomainError> {
        let [first, second] = &self.marker_keys;
        let first_present = store.get(first).await?.is_some();
        let second_present = store.get(second).await?.is_some();
        let status = CompletionStatus::classify(first_present, second_present);
        debug!(?status, first_present, second_present, "completion status");
        Ok(status)
    }
}
