//! Estimation webhook client.
//!
//! Posts an [`EstimationRequest`] to the configured webhook and hands the
//! body back verbatim. One attempt per call; failures are classified as
//! transport (no response) or service (non-2xx) errors.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{info, warn};

use crate::config::EstimatorConfig;
use crate::errors::{EstimateError, EstimateResult};
use crate::request::EstimationRequest;
use crate::session::EstimationHandoff;

/// Current library version (from Cargo.toml)
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client bound to one webhook URL
#[derive(Debug, Clone)]
pub struct EstimationClient {
    http: reqwest::Client,
    webhook_url: String,
}

impl EstimationClient {
    pub fn new(config: &EstimatorConfig) -> EstimateResult<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .user_agent(format!("design-estimator/{}", CURRENT_VERSION));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| EstimateError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(EstimationClient {
            http,
            webhook_url: config.webhook_url.trim().to_string(),
        })
    }

    /// Post the request and return the raw body on any 2xx status.
    pub async fn submit(&self, request: &EstimationRequest) -> EstimateResult<EstimationHandoff> {
        let body = request.to_json()?;
        info!(
            url = %self.webhook_url,
            project = %request.project_name,
            bytes = body.len(),
            "posting estimation request"
        );

        let response = self
            .http
            .post(&self.webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "estimation webhook unreachable");
                EstimateError::transport(e.to_string())
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!(
                status = status.as_u16(),
                error = %e,
                "failed to read estimation response body"
            );
            EstimateError::transport(e.to_string())
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %text, "estimation webhook rejected request");
            return Err(EstimateError::service(status.as_u16(), text));
        }

        info!(status = status.as_u16(), bytes = text.len(), "estimation response received");
        Ok(EstimationHandoff::new(status.as_u16(), text))
    }
}
