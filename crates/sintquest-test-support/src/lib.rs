//! Shared test fakes and utilities for the Sinterklaas secrets puzzle service.

mod clock;
mod store;
mod tokens;

pub use clock::{FixedClock, ManualClock};
pub use store::{FailingKeyValueStore, InMemoryKeyValueStore};
pub use tokens::SequenceTokenSource;
