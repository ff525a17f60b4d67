//! View instances and their lifecycle across route changes.
//!
//! The active view is rebuilt whenever the route switches to a different
//! view; the detail view survives a change of its `id` parameter and re-keys
//! its controller instead. Dropping a view drops its snapshot, and outcomes
//! still in flight for it no longer match any live ticket.

use shared::domain::{StepPayload, WorkflowId, WorkflowSummary};
use tracing::debug;

use crate::{
    error::GatewayError,
    fetch::{AttemptId, FetchController, FetchTicket},
    gateway::WorkflowGateway,
    router::Route,
};

pub type CatalogController = FetchController<(), Vec<WorkflowSummary>>;
pub type StepController = FetchController<WorkflowId, StepPayload>;

/// Gateway call a view asked for, to be executed off the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Catalog(FetchTicket<()>),
    Step(FetchTicket<WorkflowId>),
}

impl FetchRequest {
    pub fn attempt(&self) -> AttemptId {
        match self {
            FetchRequest::Catalog(ticket) => ticket.attempt(),
            FetchRequest::Step(ticket) => ticket.attempt(),
        }
    }

    pub async fn execute(self, gateway: &dyn WorkflowGateway) -> FetchOutcome {
        match self {
            FetchRequest::Catalog(ticket) => FetchOutcome::Catalog {
                result: gateway.fetch_catalog().await,
                ticket,
            },
            FetchRequest::Step(ticket) => FetchOutcome::Step {
                result: gateway.fetch_step(ticket.key()).await,
                ticket,
            },
        }
    }

    /// Ends the attempt without reaching the gateway, e.g. when the request
    /// could not be handed to the worker that executes it.
    pub fn into_failure(self, error: GatewayError) -> FetchOutcome {
        match self {
            FetchRequest::Catalog(ticket) => FetchOutcome::Catalog {
                ticket,
                result: Err(error),
            },
            FetchRequest::Step(ticket) => FetchOutcome::Step {
                ticket,
                result: Err(error),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Catalog {
        ticket: FetchTicket<()>,
        result: Result<Vec<WorkflowSummary>, GatewayError>,
    },
    Step {
        ticket: FetchTicket<WorkflowId>,
        result: Result<StepPayload, GatewayError>,
    },
}

impl FetchOutcome {
    pub fn attempt(&self) -> AttemptId {
        match self {
            FetchOutcome::Catalog { ticket, .. } => ticket.attempt(),
            FetchOutcome::Step { ticket, .. } => ticket.attempt(),
        }
    }
}

pub enum ActiveView {
    Home,
    Catalog(CatalogController),
    Detail(StepController),
    NotFound(String),
}

impl ActiveView {
    /// Builds the view for `route`, with the fetch it needs on activation.
    pub fn activate(route: &Route) -> (Self, Option<FetchRequest>) {
        match route {
            Route::Home => (ActiveView::Home, None),
            Route::Catalog => {
                let (controller, ticket) = CatalogController::activate(());
                (
                    ActiveView::Catalog(controller),
                    Some(FetchRequest::Catalog(ticket)),
                )
            }
            Route::Detail { id } => {
                let (controller, ticket) = StepController::activate(id.clone());
                (
                    ActiveView::Detail(controller),
                    Some(FetchRequest::Step(ticket)),
                )
            }
            Route::NotFound { path } => (ActiveView::NotFound(path.clone()), None),
        }
    }

    /// Moves this view to `route`.
    pub fn transition(&mut self, route: &Route) -> Option<FetchRequest> {
        match route {
            Route::Detail { id } => {
                if let ActiveView::Detail(controller) = self {
                    return controller.set_key(id.clone()).map(FetchRequest::Step);
                }
            }
            Route::Catalog if matches!(self, ActiveView::Catalog(_)) => return None,
            Route::Home if matches!(self, ActiveView::Home) => return None,
            _ => {}
        }

        let (view, request) = ActiveView::activate(route);
        *self = view;
        request
    }

    /// Starts a fresh attempt for views that fetch; `None` for the others.
    pub fn reload(&mut self) -> Option<FetchRequest> {
        match self {
            ActiveView::Catalog(controller) => Some(FetchRequest::Catalog(controller.reload())),
            ActiveView::Detail(controller) => Some(FetchRequest::Step(controller.reload())),
            ActiveView::Home | ActiveView::NotFound(_) => None,
        }
    }

    /// Routes an outcome to the controller it belongs to. Outcomes for a view
    /// that is no longer active are dropped.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        match (self, outcome) {
            (ActiveView::Catalog(controller), FetchOutcome::Catalog { ticket, result }) => {
                controller.resolve(&ticket, result)
            }
            (ActiveView::Detail(controller), FetchOutcome::Step { ticket, result }) => {
                controller.resolve(&ticket, result)
            }
            (_, outcome) => {
                debug!(attempt = %outcome.attempt(), "dropping outcome for inactive view");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
