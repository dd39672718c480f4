//! Application layer for player sessions.

pub mod kv_storage;
pub mod session_store;
