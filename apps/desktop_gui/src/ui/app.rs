use std::time::Duration;

use client_core::{ActiveView, FetchRequest, GatewayError, Navigator, Router};
use crossbeam_channel::Receiver;
use eframe::egui;
use tokio::sync::mpsc::Sender;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_fetch;
use crate::ui::views;

const IDLE_REPAINT_INTERVAL: Duration = Duration::from_millis(250);
const PENDING_REPAINT_INTERVAL: Duration = Duration::from_millis(50);

const WORKER_UNAVAILABLE: &str = "backend worker unavailable";

#[derive(Debug, Clone)]
struct StatusBanner {
    message: String,
}

impl StatusBanner {
    fn from_error(err: &UiError) -> Self {
        Self {
            message: format!("{}: {}", err_label(err.category()), err.message()),
        }
    }
}

pub struct FlowPilotApp {
    router: Router,
    view: ActiveView,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    api_base_url: String,
    status: String,
    status_banner: Option<StatusBanner>,
    worker_ready: bool,
}

impl FlowPilotApp {
    pub fn new(
        start_path: &str,
        api_base_url: impl Into<String>,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let router = Router::new(start_path);
        let (view, request) = ActiveView::activate(router.current());
        let mut app = Self {
            router,
            view,
            cmd_tx,
            ui_rx,
            api_base_url: api_base_url.into(),
            status: "Starting".to_string(),
            status_banner: None,
            worker_ready: false,
        };
        app.issue(request);
        app
    }

    /// Hands a view's fetch to the backend worker. If the worker cannot take
    /// it, the attempt ends as failed right away instead of staying pending.
    fn issue(&mut self, request: Option<FetchRequest>) {
        let Some(request) = request else {
            return;
        };
        if let Err(request) = dispatch_fetch(&self.cmd_tx, request, &mut self.status) {
            let outcome = request.into_failure(GatewayError::transport(WORKER_UNAVAILABLE));
            self.view.apply(outcome);
            let err = UiError::from_message(UiErrorContext::Dispatch, self.status.clone());
            self.status_banner = Some(StatusBanner::from_error(&err));
        }
    }

    /// Applies queued navigation and activates or re-keys the view it leads to.
    pub fn sync_route(&mut self) {
        let Some(route) = self.router.flush().cloned() else {
            return;
        };
        let request = self.view.transition(&route);
        self.issue(request);
    }

    pub fn reload(&mut self) {
        let request = self.view.reload();
        self.issue(request);
    }

    pub fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::WorkerReady => {
                self.worker_ready = true;
                self.status = "Ready".to_string();
            }
            UiEvent::Fetched(outcome) => {
                let attempt = outcome.attempt();
                if self.view.apply(outcome) {
                    tracing::debug!(%attempt, "fetch outcome applied");
                }
            }
            UiEvent::Error(err) => {
                tracing::warn!(context = ?err.context(), "{}", err.message());
                self.status = err.message().to_string();
                self.status_banner = Some(StatusBanner::from_error(&err));
            }
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.handle_ui_event(event);
        }
    }

    fn is_fetching(&self) -> bool {
        match &self.view {
            ActiveView::Catalog(controller) => controller.snapshot().is_pending(),
            ActiveView::Detail(controller) => controller.snapshot().is_pending(),
            ActiveView::Home | ActiveView::NotFound(_) => false,
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        let mut reload_requested = false;
        let can_reload = matches!(self.view, ActiveView::Catalog(_) | ActiveView::Detail(_));

        egui::TopBottomPanel::top("route_bar")
            .resizable(false)
            .exact_height(34.0)
            .frame(egui::Frame::new().inner_margin(egui::Margin::symmetric(8, 4)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let can_back = self.router.can_go_back();
                    if ui
                        .add_enabled(can_back, egui::Button::new("Back"))
                        .clicked()
                    {
                        self.router.back();
                    }
                    if ui.button("Home").clicked() {
                        self.router.navigate_to(client_core::router::HOME_PATH);
                    }
                    ui.separator();
                    ui.monospace(&self.router.state().path);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add_enabled(can_reload, egui::Button::new("Reload"))
                            .clicked()
                        {
                            reload_requested = true;
                        }
                    });
                });
            });

        if reload_requested {
            self.reload();
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .exact_height(24.0)
            .frame(egui::Frame::new().inner_margin(egui::Margin::symmetric(8, 2)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let color = if self.worker_ready {
                        egui::Color32::from_rgb(87, 171, 90)
                    } else {
                        egui::Color32::from_rgb(200, 160, 60)
                    };
                    ui.colored_label(color, "●");
                    ui.small(&self.status);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.small(&self.api_base_url);
                    });
                });
            });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            egui::Frame::NONE
                .fill(egui::Color32::from_rgb(111, 53, 53))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_active_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);

            let navigator: &mut dyn Navigator = &mut self.router;
            match &self.view {
                ActiveView::Home => views::show_home(ui, navigator),
                ActiveView::Catalog(controller) => {
                    views::show_catalog(ui, controller.snapshot(), navigator)
                }
                ActiveView::Detail(controller) => {
                    views::show_detail(ui, controller.key(), controller.snapshot(), navigator)
                }
                ActiveView::NotFound(path) => views::show_not_found(ui, path, navigator),
            }
        });
    }
}

impl eframe::App for FlowPilotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.sync_route();

        self.show_top_bar(ctx);
        self.show_status_bar(ctx);
        self.show_active_view(ctx);

        if self.router.has_pending() {
            ctx.request_repaint();
        } else if self.is_fetching() {
            ctx.request_repaint_after(PENDING_REPAINT_INTERVAL);
        } else {
            ctx.request_repaint_after(IDLE_REPAINT_INTERVAL);
        }
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
