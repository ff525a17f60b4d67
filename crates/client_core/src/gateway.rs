//! Remote data gateway: the only code that talks to the workflow backend.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    domain::{StepPayload, WorkflowId, WorkflowSummary},
    error::ApiErrorBody,
    protocol::{StepQuery, CATALOG_ENDPOINT, STEPS_ENDPOINT},
};
use tracing::{debug, warn};
use url::Url;

use crate::error::GatewayError;

/// Read-only access to the workflow backend.
///
/// Only a body that is not valid JSON is an error. Catalog entries of an
/// unexpected shape are read leniently and step payloads are kept verbatim.
#[async_trait]
pub trait WorkflowGateway: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Vec<WorkflowSummary>, GatewayError>;
    async fn fetch_step(&self, id: &WorkflowId) -> Result<StepPayload, GatewayError>;
}

pub struct HttpWorkflowGateway {
    http: Client,
    base_url: Url,
}

impl HttpWorkflowGateway {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base_url
            .join(path)
            .map_err(|err| GatewayError::InvalidBaseUrl(format!("{}: {err}", self.base_url)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let res = request
            .send()
            .await
            .map_err(|err| GatewayError::transport(err.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.bytes().await.unwrap_or_default();
            let detail = serde_json::from_slice::<ApiErrorBody>(&body)
                .ok()
                .and_then(|body| body.summary().map(str::to_string));
            return Err(GatewayError::status(status.as_u16(), detail.as_deref()));
        }

        let body = res
            .bytes()
            .await
            .map_err(|err| GatewayError::transport(err.to_string()))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl WorkflowGateway for HttpWorkflowGateway {
    async fn fetch_catalog(&self) -> Result<Vec<WorkflowSummary>, GatewayError> {
        let url = self.endpoint(CATALOG_ENDPOINT)?;
        debug!(%url, "fetching workflow catalog");
        let body: Value = match self.get_json(self.http.get(url)).await {
            Ok(body) => body,
            Err(err) => {
                warn!("workflow catalog fetch failed: {err}");
                return Err(err);
            }
        };
        if !body.is_array() {
            debug!("catalog body is not a JSON array; reading it leniently");
        }
        Ok(WorkflowSummary::list_from_value(body))
    }

    async fn fetch_step(&self, id: &WorkflowId) -> Result<StepPayload, GatewayError> {
        let url = self.endpoint(STEPS_ENDPOINT)?;
        debug!(%url, workflow_id = %id, "fetching workflow steps");
        let request = self.http.get(url).query(&StepQuery {
            id: id.as_str().to_string(),
        });
        let result = self.get_json(request).await;
        if let Err(err) = &result {
            warn!(workflow_id = %id, "workflow step fetch failed: {err}");
        }
        result
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
