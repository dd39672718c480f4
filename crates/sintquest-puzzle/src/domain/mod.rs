//! Domain layer for the puzzle context.

pub mod answer_book;
pub mod commands;
pub mod completion;
pub mod roles;
