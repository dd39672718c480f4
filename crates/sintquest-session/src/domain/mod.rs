//! Domain layer for player sessions.

pub mod cookie;
pub mod session;
pub mod storage;
