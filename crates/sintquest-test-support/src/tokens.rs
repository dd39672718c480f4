//! Predictable `TokenSource` implementations.

use std::sync::atomic::{AtomicUsize, Ordering};

use sintquest_core::tokens::TokenSource;

/// A token source that hands out `"{prefix}-0"`, `"{prefix}-1"`, ... in order.
#[derive(Debug)]
pub struct SequenceTokenSource {
    prefix: &'static str,
    next: AtomicUsize,
}

impl SequenceTokenSource {
    /// Create a new source whose tokens start with `prefix`.
    #[must_use]
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: AtomicUsize::new(0),
        }
    }
}

impl TokenSource for SequenceTokenSource {
    fn next_token(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
