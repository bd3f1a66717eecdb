//! Administrative repair pass: re-attach orphaned graph records to their
//! project root.
//!
//! Graph records created before their folder's project scope could be
//! established carry no root. This pass pages through them, resolves each
//! record's folder against the project anchor, and writes resolved roots
//! back. Records that resolve out-of-scope are left untouched — a valid
//! terminal outcome, counted honestly rather than treated as failure.

use std::collections::HashSet;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use canon_core::{defaults, DocumentStore, GraphStore, Result};

use crate::cache::RootCache;
use crate::resolver::resolve_root;

/// Parameters for one repair invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairRequest {
    /// Folder id of the project root to resolve against.
    pub anchor_root_id: String,
    /// Maximum records examined in this invocation.
    pub scan_limit: usize,
    /// Cursor from a previous invocation's report, to resume paging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_cursor: Option<u64>,
}

impl RepairRequest {
    pub fn new(anchor_root_id: impl Into<String>) -> Self {
        Self {
            anchor_root_id: anchor_root_id.into(),
            scan_limit: defaults::REPAIR_SCAN_LIMIT,
            resume_cursor: None,
        }
    }

    pub fn with_scan_limit(mut self, limit: usize) -> Self {
        self.scan_limit = limit;
        self
    }

    pub fn with_resume_cursor(mut self, cursor: Option<u64>) -> Self {
        self.resume_cursor = cursor;
        self
    }
}

/// Outcome counters for one repair invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairReport {
    /// Unrooted records examined.
    pub examined: usize,
    /// Records successfully re-attached to the anchor root.
    pub rerooted: usize,
    /// Records whose folder resolved outside the project; left untouched.
    pub out_of_scope: usize,
    /// Records with no folder id; nothing to resolve from.
    pub skipped: usize,
    /// Cursor to resume from, when more records remain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<u64>,
    /// When this invocation finished.
    pub finished_at: DateTime<Utc>,
}

/// Re-root one page of orphaned graph records.
///
/// One [`RootCache`] is shared across the page, so records under a common
/// ancestor chain cost one store walk total. Store and graph errors other
/// than unreadable-object terminations propagate; per-record scope
/// failures do not.
pub async fn repair_unrooted(
    store: &dyn DocumentStore,
    graph: &dyn GraphStore,
    request: RepairRequest,
) -> Result<RepairReport> {
    let started = Instant::now();
    let known_roots: HashSet<String> = [request.anchor_root_id.clone()].into();
    let mut cache = RootCache::new();

    let page = graph
        .list_unrooted(request.scan_limit, request.resume_cursor)
        .await?;

    let mut report = RepairReport {
        examined: page.records.len(),
        rerooted: 0,
        out_of_scope: 0,
        skipped: 0,
        next_cursor: page.next_cursor,
        finished_at: Utc::now(),
    };

    for record in &page.records {
        let Some(folder_id) = record.folder_id.as_deref() else {
            debug!(record_id = %record.id, "Record has no folder, skipping");
            report.skipped += 1;
            continue;
        };

        match resolve_root(store, folder_id, &known_roots, &mut cache).await? {
            Some(root) => {
                graph.set_root(&record.id, &root).await?;
                report.rerooted += 1;
            }
            None => {
                debug!(
                    record_id = %record.id,
                    folder_id,
                    "Record resolves outside the project, leaving untouched"
                );
                report.out_of_scope += 1;
            }
        }
    }

    report.finished_at = Utc::now();
    info!(
        examined = report.examined,
        rerooted = report.rerooted,
        out_of_scope = report.out_of_scope,
        skipped = report.skipped,
        cache_hits = cache.hits(),
        duration_ms = started.elapsed().as_millis() as u64,
        "Repair pass finished"
    );

    Ok(report)
}
