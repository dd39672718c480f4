//! Single-flight lazy initialization.
//!
//! The first caller starts the initialization future; every caller that
//! arrives while it is in flight awaits the very same attempt. A success is
//! kept for the life of the process. A failure is handed to everyone who was
//! waiting on that attempt and then forgotten, so the next call starts over.
//! There is no retry inside a single call and no backoff.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use sintquest_core::error::DomainError;

type Attempt<T> = Shared<BoxFuture<'static, Result<T, DomainError>>>;

/// A lazily initialized shared resource with single-flight initialization
/// and reset-on-failure.
pub struct SingleFlight<T> {
    attempt: Mutex<Option<Attempt<T>>>,
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an uninitialized slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attempt: Mutex::new(None),
        }
    }

    /// Returns the initialized value, starting `init` only if no attempt is
    /// in flight or memoized.
    ///
    /// # Errors
    ///
    /// Returns the error of the attempt this call joined. The slot is cleared
    /// so that a later call retries.
    pub async fn get_or_init<F, Fut>(&self, init: F) -> Result<T, DomainError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, DomainError>> + Send + 'static,
    {
        let attempt = {
            let mut slot = self.slot();
            slot.get_or_insert_with(|| init().boxed().shared()).clone()
        };

        let result = attempt.clone().await;

        if result.is_err() {
            let mut slot = self.slot();
            // A newer attempt may already have replaced ours.
            if slot.as_ref().is_some_and(|current| current.ptr_eq(&attempt)) {
                *slot = None;
            }
        }

        result
    }

    /// Returns `true` once an attempt has completed successfully.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.slot()
            .as_ref()
            .and_then(Shared::peek)
            .is_some_and(Result::is_ok)
    }

    fn slot(&self) -> MutexGuard<'_, Option<Attempt<T>>> {
        self.attempt.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleFlight")
            .field("ready", &self.is_ready())
            .finish()
    }
}
