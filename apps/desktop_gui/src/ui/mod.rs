//! UI layer for the desktop client: the app shell and its render surfaces.

pub mod app;
pub mod views;

pub use app::FlowPilotApp;

#[cfg(test)]
#[path = "tests/pointer_support.rs"]
mod pointer_support;
