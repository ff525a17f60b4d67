//! Render surfaces for the home, catalog, detail and not-found views.
//!
//! Each surface reads a snapshot and reports user intent through a
//! [`Navigator`]; none of them touches controller state.

use client_core::{router::CATALOG_PATH, FetchSnapshot, Navigator, Route};
use shared::domain::{StepPayload, WorkflowId, WorkflowSummary};

pub const LOADING_PLACEHOLDER: &str = "Loading...";
const CREATE_PATH: &str = "/create";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeAction {
    pub label: &'static str,
    pub path: &'static str,
}

pub const HOME_ACTIONS: [HomeAction; 2] = [
    HomeAction {
        label: "Explore Workflow",
        path: CATALOG_PATH,
    },
    HomeAction {
        label: "Create Workflow",
        path: CREATE_PATH,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRow {
    pub position: usize,
    pub label: String,
    /// Detail path; `None` for entries the backend sent without a usable id.
    pub target: Option<String>,
}

pub fn catalog_rows(workflows: &[WorkflowSummary]) -> Vec<CatalogRow> {
    workflows
        .iter()
        .enumerate()
        .map(|(index, workflow)| {
            let position = index + 1;
            CatalogRow {
                position,
                label: row_label(position, workflow),
                target: workflow.id.as_ref().map(Route::detail_path),
            }
        })
        .collect()
}

fn row_label(position: usize, workflow: &WorkflowSummary) -> String {
    let version = workflow
        .version
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "?".to_string());
    format!("{position}. {} (v{version})", workflow.description)
}

pub fn select_row(row: &CatalogRow, navigator: &mut dyn Navigator) {
    if let Some(target) = &row.target {
        navigator.navigate_to(target);
    }
}

pub fn detail_text(payload: &StepPayload) -> String {
    payload.to_pretty_string()
}

fn show_pending(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.weak(LOADING_PLACEHOLDER);
    });
}

fn show_failure(ui: &mut egui::Ui, message: &str) {
    ui.colored_label(egui::Color32::from_rgb(220, 110, 110), message);
}

pub fn show_home(ui: &mut egui::Ui, navigator: &mut dyn Navigator) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.heading("FlowPilot");
        ui.weak("Workflow Management");
        ui.add_space(16.0);
        for action in HOME_ACTIONS {
            if ui.button(action.label).clicked() {
                navigator.navigate_to(action.path);
            }
        }
    });
}

pub fn show_catalog(
    ui: &mut egui::Ui,
    snapshot: &FetchSnapshot<Vec<WorkflowSummary>>,
    navigator: &mut dyn Navigator,
) {
    ui.heading("Workflows");
    ui.add_space(8.0);

    match snapshot {
        FetchSnapshot::Pending => show_pending(ui),
        FetchSnapshot::Failed(message) => show_failure(ui, message),
        FetchSnapshot::Ready(workflows) => {
            if workflows.is_empty() {
                ui.weak("No workflows yet.");
                return;
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                for row in catalog_rows(workflows) {
                    let button = egui::Button::new(row.label.as_str())
                        .min_size(egui::vec2(ui.available_width(), 28.0));
                    if ui.add_enabled(row.target.is_some(), button).clicked() {
                        select_row(&row, navigator);
                    }
                }
            });
        }
    }
}

pub fn show_detail(
    ui: &mut egui::Ui,
    id: &WorkflowId,
    snapshot: &FetchSnapshot<StepPayload>,
    navigator: &mut dyn Navigator,
) {
    ui.horizontal(|ui| {
        if ui.link("Workflows").clicked() {
            navigator.navigate_to(CATALOG_PATH);
        }
        ui.weak("/");
        ui.heading(format!("Steps of {id}"));
    });
    ui.add_space(8.0);

    match snapshot {
        FetchSnapshot::Pending => show_pending(ui),
        FetchSnapshot::Failed(message) => show_failure(ui, message),
        FetchSnapshot::Ready(payload) => {
            let mut text = detail_text(payload);
            egui::ScrollArea::both().show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut text)
                        .code_editor()
                        .interactive(false)
                        .desired_width(f32::INFINITY),
                );
            });
        }
    }
}

pub fn show_not_found(ui: &mut egui::Ui, path: &str, navigator: &mut dyn Navigator) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.heading("Nothing here");
        ui.weak(format!("No page at {path}"));
        if ui.link("Back to home").clicked() {
            navigator.navigate_to(client_core::router::HOME_PATH);
        }
    });
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
