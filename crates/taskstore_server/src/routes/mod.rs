//! REST route handlers.

pub mod root;
pub mod tasks;
