//! Session storage on top of the key-value store.
//!
//! Each blob is a JSON object stored under its opaque id with a TTL equal to
//! the remaining cookie lifetime.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sintquest_core::clock::Clock;
use sintquest_core::error::DomainError;
use sintquest_core::store::KeyValueStore;
use sintquest_core::tokens::TokenSource;
use tracing::{debug, warn};

use crate::domain::cookie::DEFAULT_MAX_AGE_SECS;
use crate::domain::session::SessionData;
use crate::domain::storage::SessionStorage;

/// `SessionStorage` backed by a `KeyValueStore`.
pub struct KeyValueSessionStorage {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    tokens: Arc<dyn TokenSource>,
}

impl KeyValueSessionStorage {
    /// Creates a storage that mints ids from `tokens` and measures expiry
    /// against `clock`.
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            store,
            clock,
            tokens,
        }
    }

    fn ttl_until(&self, expires: Option<DateTime<Utc>>) -> Duration {
        match expires {
            Some(expires) => (expires - self.clock.now())
                .to_std()
                .unwrap_or(Duration::ZERO),
            None => Duration::from_secs(DEFAULT_MAX_AGE_SECS.unsigned_abs()),
        }
    }

    async fn put(
        &self,
        id: &str,
        data: &SessionData,
        expires: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError> {
        let blob = serde_json::to_string(data)
            .map_err(|e| DomainError::Infrastructure(format!("session serialization failed: {e}")))?;
        self.store
            .set_with_ttl(id, &blob, self.ttl_until(expires))
            .await
    }
}

impl std::fmt::Debug for KeyValueSessionStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueSessionStorage").finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionStorage for KeyValueSessionStorage {
    async fn create_data(
        &self,
        data: &SessionData,
        expires: Option<DateTime<Utc>>,
    ) -> Result<String, DomainError> {
        let id = self.tokens.next_token();
        self.put(&id, data, expires).await?;
        debug!(keys = data.len(), "session created");
        Ok(id)
    }

    async fn read_data(&self, id: &str) -> Result<Option<SessionData>, DomainError> {
        let Some(raw) = self.store.get(id).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(data)) => Ok(Some(data)),
            Ok(_) => {
                warn!("stored session is not a JSON object; ignoring it");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "stored session is not valid JSON; ignoring it");
                Ok(None)
            }
        }
    }

    async fn update_data(
        &self,
        id: &str,
        data: &SessionData,
        expires: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError> {
        self.put(id, data, expires).await
    }

    async fn delete_data(&self, id: &str) -> Result<(), DomainError> {
        self.store.delete(id).await
    }
}
