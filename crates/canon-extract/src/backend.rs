//! Extraction-service backend abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use canon_core::{ContextType, EntityCandidate, Result};

/// One extraction call: the files of a single batch plus their shared
/// context.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionRequest {
    /// Store identifiers of the batch's documents.
    pub file_ids: Vec<String>,
    /// Project whose canon is being extracted.
    pub project_id: String,
    /// Shared context of the batch.
    pub context_type: ContextType,
    /// Terms the extractor should not propose as entities.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored_terms: Vec<String>,
}

/// Extraction-service response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub candidates: Vec<EntityCandidate>,
}

/// Backend trait for the entity-extraction service.
#[async_trait]
pub trait ExtractionBackend: Send + Sync {
    /// Extract entity candidates for one batch of documents.
    async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResponse>;

    /// Check if the extraction backend is available.
    async fn health_check(&self) -> Result<bool>;

    /// Identifier for logs and reports.
    fn backend_name(&self) -> &str;
}
