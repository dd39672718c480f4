//! Shared application state.

use std::sync::Arc;

use sintquest_core::clock::Clock;
use sintquest_core::store::KeyValueStore;
use sintquest_core::tokens::TokenSource;
use sintquest_puzzle::application::completion_gate::CompletionGate;
use sintquest_puzzle::domain::answer_book::AnswerBook;
use sintquest_session::application::kv_storage::KeyValueSessionStorage;
use sintquest_session::application::session_store::SessionStore;
use sintquest_session::domain::cookie::CookieSettings;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Key-value store holding sessions and completion markers.
    pub store: Arc<dyn KeyValueStore>,
    /// Cookie-backed player sessions.
    pub sessions: Arc<SessionStore>,
    /// Read-only answer table.
    pub book: Arc<AnswerBook>,
    /// Two-party completion gate.
    pub gate: Arc<CompletionGate>,
}

impl AppState {
    /// Create new application state. Sessions are stored in `store` next to
    /// the completion markers.
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        tokens: Arc<dyn TokenSource>,
        cookie: CookieSettings,
        book: AnswerBook,
    ) -> Self {
        let storage = KeyValueSessionStorage::new(Arc::clone(&store), Arc::clone(&clock), tokens);
        let sessions = SessionStore::new(Arc::new(storage), clock, cookie);
        let gate = CompletionGate::new(&book);
        Self {
            store,
            sessions: Arc::new(sessions),
            book: Arc::new(book),
            gate: Arc::new(gate),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.sessions)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
