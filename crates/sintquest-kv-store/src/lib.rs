//! Sintquest key-value store adapter.
//!
//! A thin Redis client that connects lazily, at most once at a time, and
//! exposes get / set-with-expiry / delete through the core
//! `KeyValueStore` trait.

pub mod redis_store;
pub mod single_flight;
