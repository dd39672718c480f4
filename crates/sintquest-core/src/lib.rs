//! Shared abstractions.
//!
//! This crate defines the traits and types every other crate depends on:
//! time, randomness, the key-value store seam and the domain error. It
//! contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod store;
pub mod tokens;
