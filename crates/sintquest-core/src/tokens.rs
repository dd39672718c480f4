//! Opaque token generation.
//!
//! Session identifiers are minted through this seam so tests can inject a
//! predictable sequence while production draws from the thread RNG.

use rand::Rng;

/// Source of unguessable opaque identifiers.
pub trait TokenSource: Send + Sync {
    /// Returns a fresh token. Callers rely on tokens never repeating.
    fn next_token(&self) -> String;
}

/// Production token source: 128 random bits rendered as 32 lowercase hex
/// characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenSource;

impl TokenSource for RandomTokenSource {
    fn next_token(&self) -> String {
        let bits: u128 = rand::rng().random();
        format!("{bits:032x}")
    }
}
