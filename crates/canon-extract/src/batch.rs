//! Batching extractor: one extraction call per parent folder.
//!
//! Grouping by immediate parent bounds both the number of expensive
//! external calls and the context size of each, while keeping documents
//! that belong together in one request. Batches run sequentially — the
//! loop is the rate-limit control, the natural cancellation point, and
//! the anchor for a stable, monotonic progress counter.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use canon_core::{EntityCandidate, SelectedDocument};

use crate::backend::{ExtractionBackend, ExtractionRequest};

/// Configuration for a batched extraction run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractorConfig {
    /// Terms the extraction service should not propose as entities.
    pub ignored_terms: Vec<String>,
}

impl ExtractorConfig {
    pub fn with_ignored_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_terms = terms.into_iter().map(|s| s.into()).collect();
        self
    }
}

/// Per-batch outcome in a run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Parent folder the batch was grouped under.
    pub parent_id: String,
    /// Documents in the batch.
    pub file_count: usize,
    /// Candidates the batch contributed (zero on failure).
    pub candidate_count: usize,
    /// Failure message when the batch's extraction call failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of one batched extraction run. Always partial-result complete:
/// failed batches are recorded, never fatal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRunReport {
    /// Candidates from every successful batch, in batch order.
    pub candidates: Vec<EntityCandidate>,
    /// One outcome per attempted batch.
    pub batches: Vec<BatchOutcome>,
    /// True when cancellation stopped the run before all batches ran.
    pub cancelled: bool,
}

impl BatchRunReport {
    /// Batches whose extraction call failed.
    pub fn batches_failed(&self) -> usize {
        self.batches.iter().filter(|b| b.error.is_some()).count()
    }
}

/// Run the extraction service over all documents, one call per parent
/// folder.
///
/// The progress callback is invoked once per batch with a monotonic
/// `(processed, total)` pair — failed batches count as processed, so an
/// uncancelled run always ends at `total/total`. Cancellation is honored
/// between batches; calls already issued are never aborted mid-flight.
pub async fn extract_all(
    backend: &dyn ExtractionBackend,
    documents: &[SelectedDocument],
    project_id: &str,
    config: &ExtractorConfig,
    cancel: Option<&CancellationToken>,
    mut progress: impl FnMut(usize, usize),
) -> BatchRunReport {
    let batches = group_by_parent(documents);
    let total = batches.len();
    let mut report = BatchRunReport::default();

    info!(
        batch_count = total,
        document_count = documents.len(),
        project_id,
        "Starting batched extraction"
    );

    for (index, (parent_id, docs)) in batches.into_iter().enumerate() {
        if cancel.is_some_and(|c| c.is_cancelled()) {
            info!(
                batch_index = index,
                batch_count = total,
                "Extraction run cancelled between batches"
            );
            report.cancelled = true;
            break;
        }

        let request = ExtractionRequest {
            file_ids: docs.iter().map(|d| d.id.clone()).collect(),
            project_id: project_id.to_string(),
            context_type: batch_context(&docs),
            ignored_terms: config.ignored_terms.clone(),
        };

        let mut outcome = BatchOutcome {
            parent_id: parent_id.clone(),
            file_count: docs.len(),
            candidate_count: 0,
            error: None,
        };

        match backend.extract(&request).await {
            Ok(response) => {
                outcome.candidate_count = response.candidates.len();
                for mut candidate in response.candidates {
                    ensure_addressable(&mut candidate);
                    report.candidates.push(candidate);
                }
            }
            Err(e) => {
                warn!(
                    parent_id = %parent_id,
                    batch_index = index + 1,
                    error = %e,
                    "Extraction batch failed, continuing with remaining batches"
                );
                outcome.error = Some(e.to_string());
            }
        }

        report.batches.push(outcome);
        progress(index + 1, total);
    }

    info!(
        candidate_count = report.candidates.len(),
        batches_failed = report.batches_failed(),
        cancelled = report.cancelled,
        "Batched extraction finished"
    );
    report
}

/// Group documents by immediate parent folder, preserving first-seen
/// parent order.
fn group_by_parent(documents: &[SelectedDocument]) -> Vec<(String, Vec<SelectedDocument>)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<SelectedDocument>> = HashMap::new();
    for doc in documents {
        if !groups.contains_key(&doc.parent_id) {
            order.push(doc.parent_id.clone());
        }
        groups.entry(doc.parent_id.clone()).or_default().push(doc.clone());
    }
    order
        .into_iter()
        .map(|parent| {
            let docs = groups.remove(&parent).unwrap_or_default();
            (parent, docs)
        })
        .collect()
}

/// Context for a batch: groups are assumed uniform, so the first document
/// decides. Mixed groups are possible when a folder holds both kinds.
fn batch_context(docs: &[SelectedDocument]) -> canon_core::ContextType {
    let context = docs[0].context_type;
    if docs.iter().any(|d| d.context_type != context) {
        debug!(
            parent_id = %docs[0].parent_id,
            "Batch mixes context types, using the first document's"
        );
    }
    context
}

/// Guarantee a candidate is addressable downstream even when the
/// extraction service supplied no identifier. UUIDv7: embedded timestamp
/// plus random suffix.
fn ensure_addressable(candidate: &mut EntityCandidate) {
    if candidate.id.as_deref().map_or(true, str::is_empty) {
        candidate.id = Some(Uuid::now_v7().to_string());
    }
}
