//! Path-based navigation between the home, catalog and detail views.

use std::collections::{BTreeMap, VecDeque};

use shared::domain::WorkflowId;
use tracing::{debug, info};

pub const HOME_PATH: &str = "/";
pub const CATALOG_PATH: &str = "/workflows";
pub const CATALOG_ALIAS_PATH: &str = "/explore";
const DETAIL_PREFIX: &str = "/steps/";
pub const ID_PARAM: &str = "id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Catalog,
    Detail { id: WorkflowId },
    NotFound { path: String },
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let raw = path.trim();
        let without_query = raw.split(['?', '#']).next().unwrap_or_default();
        let normalized = without_query.trim_end_matches('/');

        match normalized {
            "" => Route::Home,
            CATALOG_PATH | CATALOG_ALIAS_PATH => Route::Catalog,
            _ => normalized
                .strip_prefix(DETAIL_PREFIX)
                .filter(|segment| !segment.contains('/'))
                .and_then(WorkflowId::new)
                .map(|id| Route::Detail { id })
                .unwrap_or_else(|| Route::NotFound {
                    path: raw.to_string(),
                }),
        }
    }

    pub fn detail_path(id: &WorkflowId) -> String {
        format!("{DETAIL_PREFIX}{id}")
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => HOME_PATH.to_string(),
            Route::Catalog => CATALOG_PATH.to_string(),
            Route::Detail { id } => Self::detail_path(id),
            Route::NotFound { path } => path.clone(),
        }
    }

    pub fn params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        if let Route::Detail { id } = self {
            params.insert(ID_PARAM.to_string(), id.to_string());
        }
        params
    }
}

/// Read-only view of the active route handed to views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteState {
    pub path: String,
    pub params: BTreeMap<String, String>,
}

impl RouteState {
    pub fn from_route(route: &Route) -> Self {
        Self {
            path: route.path(),
            params: route.params(),
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// The one operation render code may use to change views.
pub trait Navigator {
    fn navigate_to(&mut self, path: &str);
}

#[derive(Debug)]
enum NavigationRequest {
    Push(String),
    Back,
}

/// Owns the active route. Navigation requests are queued and take effect on
/// the next [`Router::flush`], so callers never observe a half-switched view.
pub struct Router {
    current: Route,
    state: RouteState,
    queue: VecDeque<NavigationRequest>,
    history: Vec<Route>,
}

impl Router {
    pub fn new(start_path: &str) -> Self {
        let current = Route::parse(start_path);
        Self {
            state: RouteState::from_route(&current),
            current,
            queue: VecDeque::new(),
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn state(&self) -> &RouteState {
        &self.state
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Queues a return to the previous route.
    pub fn back(&mut self) {
        self.queue.push_back(NavigationRequest::Back);
    }

    /// Applies queued navigation in order. Returns the new active route when
    /// it differs from the one active before the flush; otherwise history is
    /// left as it was.
    pub fn flush(&mut self) -> Option<&Route> {
        if self.queue.is_empty() {
            return None;
        }
        let before = self.current.clone();
        let history_before = self.history.clone();

        while let Some(request) = self.queue.pop_front() {
            match request {
                NavigationRequest::Push(path) => {
                    let next = Route::parse(&path);
                    if next != self.current {
                        let previous = std::mem::replace(&mut self.current, next);
                        self.history.push(previous);
                    }
                }
                NavigationRequest::Back => match self.history.pop() {
                    Some(previous) => self.current = previous,
                    None => debug!("navigation history is empty"),
                },
            }
        }

        if self.current == before {
            self.history = history_before;
            return None;
        }
        self.state = RouteState::from_route(&self.current);
        info!(path = %self.state.path, "route changed");
        Some(&self.current)
    }
}

impl Navigator for Router {
    fn navigate_to(&mut self, path: &str) {
        debug!(path, "navigation requested");
        self.queue
            .push_back(NavigationRequest::Push(path.to_string()));
    }
}

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod tests;
