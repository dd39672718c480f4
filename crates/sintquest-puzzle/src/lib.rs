//! Puzzle context: answers, codeword authentication and the completion gate.
//!
//! Two players, one role each. Each role answers a trivia question per
//! location, earning one letter of its codeword per correct answer. Entering
//! a codeword drops a short-lived marker in the key-value store; the mission
//! is complete while both markers are alive.

pub mod application;
pub mod domain;
