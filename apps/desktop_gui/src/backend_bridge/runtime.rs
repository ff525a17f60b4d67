//! Backend worker: a thread hosting a single-threaded tokio runtime.
//!
//! Each fetch runs as its own task, so a newer request is never held up by an
//! older one still waiting on the network; outcomes go back to the UI in
//! completion order.

use std::{sync::Arc, thread, time::Duration};

use client_core::WorkflowGateway;
use crossbeam_channel::{Sender, TrySendError};
use tokio::sync::mpsc::Receiver;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

const UI_QUEUE_RETRY_INTERVAL: Duration = Duration::from_millis(10);

pub fn launch(
    mut cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    gateway: Arc<dyn WorkflowGateway>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            deliver(&ui_tx, UiEvent::WorkerReady).await;
            tracing::info!("backend worker ready");

            while let Some(cmd) = cmd_rx.recv().await {
                match cmd {
                    BackendCommand::Fetch(request) => {
                        let gateway = gateway.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let attempt = request.attempt();
                            let outcome = request.execute(gateway.as_ref()).await;
                            if !deliver(&ui_tx, UiEvent::Fetched(outcome)).await {
                                tracing::debug!(%attempt, "ui closed before fetch completed");
                            }
                        });
                    }
                }
            }

            tracing::info!("command queue closed; backend worker stopping");
        });
    })
}

/// Posts `event` to the UI, waiting for room while the queue is full so no
/// outcome is lost. Returns `false` once the UI side has gone away.
async fn deliver(ui_tx: &Sender<UiEvent>, mut event: UiEvent) -> bool {
    let mut waited = false;
    loop {
        match ui_tx.try_send(event) {
            Ok(()) => return true,
            Err(TrySendError::Disconnected(_)) => return false,
            Err(TrySendError::Full(pending)) => {
                if !waited {
                    tracing::warn!("ui event queue full; holding event until it drains");
                    waited = true;
                }
                event = pending;
                tokio::time::sleep(UI_QUEUE_RETRY_INTERVAL).await;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
