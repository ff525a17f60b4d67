//! Command orchestration from UI actions to the backend command queue.

use client_core::FetchRequest;
use tokio::sync::mpsc::{error::TrySendError, Sender};

use crate::backend_bridge::commands::BackendCommand;

/// Queues a fetch for the backend worker. When the queue cannot take it the
/// request is handed back so the caller can end its attempt.
pub fn dispatch_fetch(
    cmd_tx: &Sender<BackendCommand>,
    request: FetchRequest,
    status: &mut String,
) -> Result<(), FetchRequest> {
    let attempt = request.attempt();
    let kind = match &request {
        FetchRequest::Catalog(_) => "fetch_catalog",
        FetchRequest::Step(_) => "fetch_step",
    };

    match cmd_tx.try_send(BackendCommand::Fetch(request)) {
        Ok(()) => {
            tracing::debug!(command = kind, %attempt, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(BackendCommand::Fetch(request))) => {
            *status = "UI command queue is full; use Reload to retry".to_string();
            Err(request)
        }
        Err(TrySendError::Closed(BackendCommand::Fetch(request))) => {
            *status = "Backend worker disconnected; restart the app".to_string();
            Err(request)
        }
    }
}
