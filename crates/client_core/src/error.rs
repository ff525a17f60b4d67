use thiserror::Error;

/// Failure of a single gateway call. Every variant ends the fetch attempt
/// that issued it; nothing here is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("{message}")]
    Network {
        status: Option<u16>,
        message: String,
    },
    #[error("failed to parse response body: {0}")]
    Parse(String),
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl GatewayError {
    pub fn status(status: u16, detail: Option<&str>) -> Self {
        let message = match detail {
            Some(detail) => format!("HTTP {status}: {detail}"),
            None => format!("HTTP {status}"),
        };
        GatewayError::Network {
            status: Some(status),
            message,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        GatewayError::Network {
            status: None,
            message: format!("request failed: {}", message.into()),
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            GatewayError::Network { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Parse(err.to_string())
    }
}
