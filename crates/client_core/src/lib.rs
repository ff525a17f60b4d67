//! Navigation and data-fetch core of the FlowPilot workflow client.
//!
//! The crate is UI-agnostic: the router decides which view is active, each
//! view owns a fetch controller, and the gateway performs the HTTP calls.
//! Render code only ever sees snapshots and a [`Navigator`].

pub mod error;
pub mod fetch;
pub mod gateway;
pub mod router;
pub mod views;

pub use error::GatewayError;
pub use fetch::{AttemptId, FetchController, FetchSnapshot, FetchStatus, FetchTicket};
pub use gateway::{HttpWorkflowGateway, WorkflowGateway};
pub use router::{Navigator, Route, RouteState, Router};
pub use views::{ActiveView, CatalogController, FetchOutcome, FetchRequest, StepController};
