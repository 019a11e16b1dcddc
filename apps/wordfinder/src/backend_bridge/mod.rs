//! Bridge between the UI loop and the backend worker thread.

pub mod commands;
pub mod runtime;
