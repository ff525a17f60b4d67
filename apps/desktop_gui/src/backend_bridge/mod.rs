//! Bridge between the UI thread and the backend worker that runs gateway calls.

pub mod commands;
pub mod runtime;
