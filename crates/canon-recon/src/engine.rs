//! The scan → extract → reconcile pipeline.
//!
//! Data flows strictly one way: tree → selected documents → batches →
//! raw candidates → reconciled candidates. The engine surfaces progress
//! through an event callback and honors cooperative cancellation between
//! extraction batches; calls already in flight are never aborted.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

use canon_core::{FolderNode, GraphStore, ReconciledCandidate, Result};
use canon_extract::{extract_all, BatchOutcome, ExtractionBackend, ExtractorConfig};
use canon_scan::{select_documents, ScanConfig};

use crate::reconcile::reconcile;

/// Progress callback type for engine runs.
pub type ProgressCallback = Box<dyn Fn(&ScanEvent) + Send + Sync>;

/// Event emitted while a run progresses.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// The strict scan selected nothing and the permissive fallback ran.
    ScanDegraded,
    /// Document selection finished.
    ScanFinished { selected: usize },
    /// One extraction batch finished (successfully or not).
    BatchFinished { processed: usize, total: usize },
    /// The whole run finished.
    RunFinished { candidates: usize, cancelled: bool },
}

/// Options for one engine run.
pub struct RunOptions {
    /// Project whose canon is being reconciled.
    pub project_id: String,
    /// Folder ids designated as canon roots.
    pub canon_root_ids: HashSet<String>,
    /// Scanner configuration.
    pub scan: ScanConfig,
    /// Extraction configuration.
    pub extractor: ExtractorConfig,
    /// Cancellation token, checked between batches.
    pub cancel: CancellationToken,
    progress: Option<ProgressCallback>,
}

impl RunOptions {
    pub fn new(project_id: impl Into<String>, canon_root_ids: HashSet<String>) -> Self {
        Self {
            project_id: project_id.into(),
            canon_root_ids,
            scan: ScanConfig::default(),
            extractor: ExtractorConfig::default(),
            cancel: CancellationToken::new(),
            progress: None,
        }
    }

    /// Set the progress callback.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ScanEvent) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    fn emit(&self, event: ScanEvent) {
        if let Some(callback) = &self.progress {
            callback(&event);
        }
    }
}

/// Result of one engine run. Always best-effort complete: failed batches
/// and degraded scans are reported, not thrown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Documents the scanner selected.
    pub documents_selected: usize,
    /// True when the permissive fallback scan ran.
    pub degraded: bool,
    /// True when cancellation stopped the run early.
    pub cancelled: bool,
    /// Per-batch outcomes from the extraction stage.
    pub batches: Vec<BatchOutcome>,
    /// Reconciled candidates, ready for downstream acceptance.
    pub reconciled: Vec<ReconciledCandidate>,
}

impl RunSummary {
    /// Batches whose extraction call failed.
    pub fn batches_failed(&self) -> usize {
        self.batches.iter().filter(|b| b.error.is_some()).count()
    }
}

/// The reconciliation engine: composes scanner, batching extractor, and
/// reconciler over the graph's canonical set.
pub struct ReconEngine {
    graph: Arc<dyn GraphStore>,
    backend: Arc<dyn ExtractionBackend>,
}

impl ReconEngine {
    pub fn new(graph: Arc<dyn GraphStore>, backend: Arc<dyn ExtractionBackend>) -> Self {
        Self { graph, backend }
    }

    /// Run the full pipeline over a pre-fetched tree.
    ///
    /// Only graph reads can fail the run; scan and extraction degrade
    /// instead of failing.
    pub async fn run(&self, tree: &[FolderNode], options: &RunOptions) -> Result<RunSummary> {
        let started = Instant::now();

        let scan = select_documents(tree, &options.canon_root_ids, &options.scan);
        if scan.degraded {
            options.emit(ScanEvent::ScanDegraded);
        }
        options.emit(ScanEvent::ScanFinished {
            selected: scan.documents.len(),
        });

        let extraction = extract_all(
            self.backend.as_ref(),
            &scan.documents,
            &options.project_id,
            &options.extractor,
            Some(&options.cancel),
            |processed, total| options.emit(ScanEvent::BatchFinished { processed, total }),
        )
        .await;

        let canonical = self.graph.canonical_nodes(&options.project_id).await?;
        let reconciled = reconcile(extraction.candidates, &canonical, &options.project_id);

        let summary = RunSummary {
            documents_selected: scan.documents.len(),
            degraded: scan.degraded,
            cancelled: extraction.cancelled,
            batches: extraction.batches,
            reconciled,
        };

        options.emit(ScanEvent::RunFinished {
            candidates: summary.reconciled.len(),
            cancelled: summary.cancelled,
        });
        info!(
            project_id = %options.project_id,
            selected_count = summary.documents_selected,
            batch_count = summary.batches.len(),
            batches_failed = summary.batches_failed(),
            candidate_count = summary.reconciled.len(),
            degraded = summary.degraded,
            cancelled = summary.cancelled,
            duration_ms = started.elapsed().as_millis() as u64,
            "Reconciliation run finished"
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_summary_counts_failed_batches() {
        let summary = RunSummary {
            documents_selected: 3,
            degraded: false,
            cancelled: false,
            batches: vec![
                BatchOutcome {
                    parent_id: "a".into(),
                    file_count: 2,
                    candidate_count: 4,
                    error: None,
                },
                BatchOutcome {
                    parent_id: "b".into(),
                    file_count: 1,
                    candidate_count: 0,
                    error: Some("boom".into()),
                },
            ],
            reconciled: vec![],
        };
        assert_eq!(summary.batches_failed(), 1);
    }

    #[test]
    fn test_options_emit_without_callback_is_noop() {
        let options = RunOptions::new("p1", HashSet::new());
        options.emit(ScanEvent::ScanDegraded);
    }
}
