use serde::{Deserialize, Serialize};

/// Error body returned by the workflow backend on non-2xx responses.
///
/// Hand-written views answer with `{"message": ...}`, framework-generated
/// errors with `{"detail": ...}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            detail: None,
        }
    }

    pub fn summary(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.detail.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
