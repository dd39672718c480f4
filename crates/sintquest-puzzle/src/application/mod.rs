//! Application layer for the puzzle context.

pub mod command_handlers;
pub mod completion_gate;
pub mod query_handlers;
