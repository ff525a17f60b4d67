//! Controller layer: UI events, error presentation, and command dispatch.

pub mod events;
pub mod orchestration;
