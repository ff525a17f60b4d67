use serde::{Deserialize, Serialize};

/// Catalog listing, relative to the API base URL.
pub const CATALOG_ENDPOINT: &str = "api/workflows/";
/// Step listing for one workflow, relative to the API base URL.
pub const STEPS_ENDPOINT: &str = "api/steps/";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepQuery {
    pub id: String,
}
