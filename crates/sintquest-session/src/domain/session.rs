//! The player session and its typed accessors.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Flat mapping of string keys to JSON values, as stored in the blob.
pub type SessionData = Map<String, Value>;

const NAME_KEY: &str = "name";
const ANSWERED_KEY: &str = "answered";

/// Server-side state for one browser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    id: Option<String>,
    data: SessionData,
}

impl Session {
    /// An empty session with no id. Nothing is persisted until it is written.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A session loaded from storage.
    #[must_use]
    pub fn with_data(id: String, data: SessionData) -> Self {
        Self { id: Some(id), data }
    }

    /// The opaque id, once one has been minted.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// `true` until the session has been stored for the first time.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub(crate) fn assign_id(&mut self, id: String) {
        self.id = Some(id);
    }

    /// The raw blob.
    #[must_use]
    pub fn data(&self) -> &SessionData {
        &self.data
    }

    /// Reads a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Writes a raw value, replacing what was there.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    /// The display name claimed by this browser, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.data
            .get(NAME_KEY)
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Claims `name` as this browser's display name. The first claim wins;
    /// later claims and blank names are ignored. Returns `true` if the
    /// session changed.
    pub fn claim_name(&mut self, name: &str) -> bool {
        if self.name().is_some() || name.trim().is_empty() {
            return false;
        }
        self.set(NAME_KEY, Value::String(name.to_owned()));
        true
    }

    /// Indices of the questions this browser has solved.
    ///
    /// Entries that are not non-negative integers are skipped.
    #[must_use]
    pub fn answered(&self) -> BTreeSet<u32> {
        self.data
            .get(ANSWERED_KEY)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_u64)
                    .filter_map(|n| u32::try_from(n).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether question `index` has been solved.
    #[must_use]
    pub fn has_answered(&self, index: u32) -> bool {
        self.answered().contains(&index)
    }

    /// Records question `index` as solved. Recording an index twice leaves
    /// the set unchanged. Returns `true` if the session changed.
    pub fn record_answer(&mut self, index: u32) -> bool {
        let mut answered = self.answered();
        if !answered.insert(index) {
            return false;
        }
        let sequence = answered.into_iter().map(Value::from).collect();
        self.set(ANSWERED_KEY, Value::Array(sequence));
        true
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();

        assert!(session.is_new());
        assert_eq!(session.name(), None);
        assert!(session.answered().is_empty());
    }

    #[test]
    fn test_claim_name_first_write_wins() {
        // Arrange
        let mut session = Session::new();

        // Act
        let first = session.claim_name("Marlies");
        let second = session.claim_name("Roan");

        // Assert
        assert!(first);
        assert!(!second);
        assert_eq!(session.name(), Some("Marlies"));
    }

    #[test]
    fn test_claim_name_ignores_blank() {
        let mut session = Session::new();

        assert!(!session.claim_name("   "));
        assert_eq!(session.name(), None);
    }

    #[test]
    fn test_record_answer_twice_keeps_single_entry() {
        // Arrange
        let mut session = Session::new();

        // Act
        let first = session.record_answer(2);
        let second = session.record_answer(2);

        // Assert
        assert!(first);
        assert!(!second);
        assert_eq!(session.answered().len(), 1);
        assert_eq!(session.get("answered"), Some(&json!([2])));
    }

    #[test]
    fn test_record_answer_stores_sorted_sequence() {
        let mut session = Session::new();

        session.record_answer(3);
        session.record_answer(0);
        session.record_answer(1);

        assert_eq!(session.get("answered"), Some(&json!([0, 1, 3])));
        assert!(session.has_answered(0));
        assert!(!session.has_answered(2));
    }

    #[test]
    fn test_answered_skips_foreign_entries() {
        let mut data = SessionData::new();
        data.insert("answered".into(), json!([1, "two", -3, 1.5, 3]));
        let session = Session::with_data("sid".into(), data);

        assert_eq!(session.answered().into_iter().collect::<Vec<_>>(), vec![1, 3]);
    }
}
