//! Key-value store abstraction.
//!
//! Everything that must be visible across requests, or across the two
//! players' browsers, lives behind this trait. Each call is an independent,
//! non-atomic operation; there is no transaction spanning several keys.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::DomainError;

/// String-keyed, string-valued store with store-enforced expiry.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` if it is absent or
    /// has expired.
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Stores `value` under `key`, replacing any previous value and
    /// resetting its expiry to `ttl` from now.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration)
    -> Result<(), DomainError>;

    /// Removes `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), DomainError>;
}

/// Converts a TTL to whole seconds, rounding to the nearest second and never
/// going below one (stores reject a zero expiry).
#[must_use]
pub fn ttl_seconds(ttl: Duration) -> u64 {
    let rounded = (ttl.as_millis() + 500) / 1_000;
    u64::try_from(rounded).unwrap_or(u64::MAX).max(1)
}
