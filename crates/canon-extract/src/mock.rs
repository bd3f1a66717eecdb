//! Mock extraction backend for deterministic testing.
//!
//! Responses are scripted per file id; failures are injected explicitly
//! rather than randomly so batch-isolation tests are reproducible. Every
//! request is logged for assertion.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use canon_core::{EntityCandidate, Error, Result};

use crate::backend::{ExtractionBackend, ExtractionRequest, ExtractionResponse};

/// Scripted mock implementation of [`ExtractionBackend`].
#[derive(Clone, Default)]
pub struct MockExtractionBackend {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    candidates_by_file: HashMap<String, Vec<EntityCandidate>>,
    fail_on_files: Vec<String>,
    calls: Vec<ExtractionRequest>,
}

impl MockExtractionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script candidates returned when a request includes this file.
    pub fn with_candidates_for_file(
        self,
        file_id: impl Into<String>,
        candidates: Vec<EntityCandidate>,
    ) -> Self {
        self.state
            .lock()
            .unwrap()
            .candidates_by_file
            .insert(file_id.into(), candidates);
        self
    }

    /// Fail any request that includes this file.
    pub fn with_failure_for_file(self, file_id: impl Into<String>) -> Self {
        self.state.lock().unwrap().fail_on_files.push(file_id.into());
        self
    }

    /// All requests received so far.
    pub fn calls(&self) -> Vec<ExtractionRequest> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of extraction calls received.
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }
}

#[async_trait]
impl ExtractionBackend for MockExtractionBackend {
    async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResponse> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(request.clone());

        if request
            .file_ids
            .iter()
            .any(|f| state.fail_on_files.contains(f))
        {
            return Err(Error::Extraction("scripted batch failure".to_string()));
        }

        let candidates = request
            .file_ids
            .iter()
            .filter_map(|f| state.candidates_by_file.get(f).cloned())
            .flatten()
            .collect();

        Ok(ExtractionResponse { candidates })
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn backend_name(&self) -> &str {
        "extractor-mock"
    }
}

/// Candidate constructor for tests.
pub fn candidate(name: &str, entity_type: &str, confidence: u8) -> EntityCandidate {
    EntityCandidate {
        id: None,
        name: name.to_string(),
        entity_type: entity_type.to_string(),
        confidence,
        reasoning: String::new(),
        found_in_files: Vec::new(),
        suggested_action: None,
        merge_with_id: None,
    }
}
