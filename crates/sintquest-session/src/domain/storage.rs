//! Session storage contract.
//!
//! Create/read/update/delete of keyed session blobs, independent of how the
//! id travels to the browser.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sintquest_core::error::DomainError;

use super::session::SessionData;

/// Backend that persists session blobs under opaque ids.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Stores `data` under a freshly minted id and returns that id. The blob
    /// expires at `expires`, or after the default lifetime if `None`.
    async fn create_data(
        &self,
        data: &SessionData,
        expires: Option<DateTime<Utc>>,
    ) -> Result<String, DomainError>;

    /// Loads the blob stored under `id`. Missing, expired or unreadable blobs
    /// come back as `None`.
    async fn read_data(&self, id: &str) -> Result<Option<SessionData>, DomainError>;

    /// Overwrites the blob under `id` and resets its expiry.
    async fn update_data(
        &self,
        id: &str,
        data: &SessionData,
        expires: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError>;

    /// Removes the blob under `id`.
    async fn delete_data(&self, id: &str) -> Result<(), DomainError>;
}
