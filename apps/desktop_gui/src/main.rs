use std::sync::Arc;

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::anyhow;
use clap::Parser;
use client_core::HttpWorkflowGateway;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::config::{load_settings, parse_api_base_url, Args};
use crate::controller::events::UiEvent;
use crate::ui::FlowPilotApp;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    let base_url = parse_api_base_url(&settings.api_base_url)?;
    tracing::info!(api_base_url = %base_url, start_path = %settings.start_path, "starting flowpilot");
    let gateway = Arc::new(HttpWorkflowGateway::new(base_url.clone()));

    let (cmd_tx, cmd_rx) = tokio::sync::mpsc::channel::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let _worker = runtime::launch(cmd_rx, ui_tx, gateway);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("FlowPilot")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    let start_path = settings.start_path;
    eframe::run_native(
        "FlowPilot",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(FlowPilotApp::new(
                &start_path,
                base_url.to_string(),
                cmd_tx,
                ui_rx,
            )))
        }),
    )
    .map_err(|err| anyhow!("failed to run desktop app: {err}"))
}
