//! Redis implementation of the `KeyValueStore` trait.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use tracing::{debug, error, info};

use sintquest_core::error::DomainError;
use sintquest_core::store::{KeyValueStore, ttl_seconds};

use crate::single_flight::SingleFlight;

/// Redis-backed key-value store.
///
/// Construction only validates the URL. The connection is opened by the
/// first operation and shared by every later one.
pub struct RedisKeyValueStore {
    client: redis::Client,
    connection: SingleFlight<ConnectionManager>,
}

impl RedisKeyValueStore {
    /// Creates a store for the Redis server at `url` without connecting.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the URL cannot be parsed.
    pub fn open(url: &str) -> Result<Self, DomainError> {
        let client = redis::Client::open(url)
            .map_err(|e| DomainError::Infrastructure(format!("invalid key-value store URL: {e}")))?;
        Ok(Self {
            client,
            connection: SingleFlight::new(),
        })
    }

    /// Returns `true` once a connection has been established.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection.is_ready()
    }

    async fn connection(&self) -> Result<ConnectionManager, DomainError> {
        let client = self.client.clone();
        self.connection
            .get_or_init(move || async move {
                info!("connecting to key-value store");
                // No reconnect backoff on the first attempt; the next request retries.
                let config = ConnectionManagerConfig::new().set_number_of_retries(0);
                client
                    .get_connection_manager_with_config(config)
                    .await
                    .map_err(|e| {
                        error!(error = %e, "key-value store connection failed");
                        DomainError::Infrastructure(format!(
                            "key-value store connection failed: {e}"
                        ))
                    })
            })
            .await
    }
}

impl std::fmt::Debug for RedisKeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisKeyValueStore")
            .field("client", &self.client)
            .field("connection", &self.connection)
            .finish()
    }
}

fn command_failed(op: &'static str, key: &str, err: &redis::RedisError) -> DomainError {
    error!(op, key, error = %err, "key-value command failed");
    DomainError::Infrastructure(format!("key-value {op} failed: {err}"))
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| command_failed("get", key, &e))?;
        debug!(key, hit = value.is_some(), "key-value get");
        Ok(value)
    }

    async fn set_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> Result<(), DomainError> {
        let mut conn = self.connection().await?;
        let seconds = ttl_seconds(ttl);
        conn.set_ex::<_, _, ()>(key, value, seconds)
            .await
            .map_err(|e| command_failed("set", key, &e))?;
        debug!(key, ttl_seconds = seconds, "key-value set");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key)
            .await
            .map_err(|e| command_failed("delete", key, &e))?;
        debug!(key, "key-value delete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_malformed_url() {
        let result = RedisKeyValueStore::open("not a url");

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    #[test]
    fn test_open_does_not_connect() {
        let store = RedisKeyValueStore::open("redis://127.0.0.1:6379").unwrap();

        assert!(!store.is_connected());
    }
}
