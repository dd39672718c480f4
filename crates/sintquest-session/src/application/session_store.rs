//! Cookie-to-storage bridge.
//!
//! Reading never fails: anything short of a verified cookie pointing at a
//! readable blob yields a fresh session. Writing and destroying are
//! best-effort; failures are logged and reported in the returned `Commit`,
//! and it is up to the caller whether to surface them.

use std::sync::Arc;

use sintquest_core::clock::Clock;
use sintquest_core::error::DomainError;
use tracing::{error, warn};

use crate::domain::cookie::CookieSettings;
use crate::domain::session::Session;
use crate::domain::storage::SessionStorage;

/// Outcome of persisting or destroying a session.
#[derive(Debug)]
#[must_use]
pub struct Commit {
    /// `Set-Cookie` value to send back, if any. A brand-new session whose
    /// blob could not be stored gets no cookie.
    pub set_cookie: Option<String>,
    /// Whether the backing store accepted the change.
    pub outcome: Result<(), DomainError>,
}

impl Commit {
    /// `true` if the backing store accepted the change.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Loads and saves player sessions referenced by the session cookie.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    clock: Arc<dyn Clock>,
    cookie: CookieSettings,
}

impl SessionStore {
    /// Creates a session store.
    #[must_use]
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        clock: Arc<dyn Clock>,
        cookie: CookieSettings,
    ) -> Self {
        Self {
            storage,
            clock,
            cookie,
        }
    }

    /// The cookie attributes in use.
    #[must_use]
    pub fn cookie(&self) -> &CookieSettings {
        &self.cookie
    }

    /// Resolves the session referenced by a raw `Cookie` request header.
    pub async fn read(&self, cookie_header: Option<&str>) -> Session {
        let Some(id) = cookie_header.and_then(|h| self.cookie.session_id_from_header(h)) else {
            return Session::new();
        };
        match self.storage.read_data(id).await {
            Ok(Some(data)) => Session::with_data(id.to_owned(), data),
            Ok(None) => Session::new(),
            Err(e) => {
                warn!(error = %e, "session read failed; starting a fresh session");
                Session::new()
            }
        }
    }

    /// Persists `session`, minting an id on first write, and refreshes its
    /// lifetime.
    pub async fn write(&self, session: &mut Session) -> Commit {
        let expires = self.clock.now() + self.cookie.max_age;

        let outcome = match session.id() {
            Some(id) => self
                .storage
                .update_data(id, session.data(), Some(expires))
                .await
                .inspect_err(|e| error!(error = %e, "session update failed")),
            None => match self.storage.create_data(session.data(), Some(expires)).await {
                Ok(id) => {
                    session.assign_id(id);
                    Ok(())
                }
                Err(e) => {
                    error!(error = %e, "session create failed");
                    Err(e)
                }
            },
        };

        let set_cookie = session
            .id()
            .map(|id| self.cookie.commit_header(id, expires));

        Commit {
            set_cookie,
            outcome,
        }
    }

    /// Deletes the blob behind `session` and clears the cookie.
    pub async fn destroy(&self, session: &Session) -> Commit {
        let outcome = match session.id() {
            Some(id) => self
                .storage
                .delete_data(id)
                .await
                .inspect_err(|e| error!(error = %e, "session delete failed")),
            None => Ok(()),
        };

        Commit {
            set_cookie: Some(self.cookie.clear_header()),
            outcome,
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("cookie", &self.cookie)
            .finish_non_exhaustive()
    }
}
