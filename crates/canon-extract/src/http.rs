//! HTTP client for the entity-extraction sidecar service.
//!
//! # Configuration
//!
//! - `CANON_EXTRACTOR_URL`: base URL of the extraction service
//!   (default: `http://127.0.0.1:8090`). Set to empty string to disable.

use async_trait::async_trait;
use serde::Deserialize;

use canon_core::{defaults, Error, Result};

use crate::backend::{ExtractionBackend, ExtractionRequest, ExtractionResponse};

/// Extraction-service HTTP client.
pub struct HttpExtractionBackend {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpExtractionBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
            timeout_secs: defaults::EXTRACT_TIMEOUT_SECS,
        }
    }

    /// Create from environment variables.
    /// Returns `None` if `CANON_EXTRACTOR_URL` is explicitly set to empty.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var(defaults::ENV_EXTRACTOR_URL)
            .unwrap_or_else(|_| defaults::EXTRACTOR_URL.to_string());
        if base_url.is_empty() {
            return None;
        }
        Some(Self::new(base_url))
    }

    /// Override the per-batch request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Health check response from the extraction service.
#[derive(Deserialize)]
struct HealthResponse {
    status: String,
}

#[async_trait]
impl ExtractionBackend for HttpExtractionBackend {
    async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResponse> {
        let url = format!("{}/extract", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .send()
            .await
            .map_err(|e| Error::Extraction(format!("extraction request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Extraction(format!(
                "extraction service returned {status}: {body}"
            )));
        }

        let result: ExtractionResponse = response.json().await.map_err(|e| {
            Error::Extraction(format!("failed to parse extraction response: {e}"))
        })?;

        Ok(result)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        match self
            .client
            .get(&url)
            .timeout(std::time::Duration::from_secs(defaults::HEALTH_TIMEOUT_SECS))
            .send()
            .await
        {
            Ok(resp) => {
                if resp.status().is_success() {
                    if let Ok(health) = resp.json::<HealthResponse>().await {
                        if health.status == "healthy" {
                            return Ok(true);
                        }
                    }
                }
                Ok(false)
            }
            Err(_) => Ok(false),
        }
    }

    fn backend_name(&self) -> &str {
        "extractor-http"
    }
}
