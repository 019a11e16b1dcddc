//! Text UI: rendering of result views and the interactive prompt loop.

pub mod render;
pub mod repl;
