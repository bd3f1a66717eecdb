//! Structured logging schema and field name constants for canonweave.
//!
//! All crates use these constants for consistent structured logging fields.
//! This ensures log aggregation tools (Loki, Elasticsearch) can query by
//! standardized field names across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events, run completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data (tree nodes, candidates) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "store", "scan", "extract", "recon"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "resolver", "repair", "scanner", "batcher", "reconciler"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "resolve_root", "select_documents", "extract_all", "reconcile"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Project whose canon is being scanned or reconciled.
pub const PROJECT_ID: &str = "project_id";

/// Folder identifier in the external document store.
pub const FOLDER_ID: &str = "folder_id";

/// Graph record identifier being repaired.
pub const RECORD_ID: &str = "record_id";

/// Candidate entity name under reconciliation.
pub const CANDIDATE_NAME: &str = "candidate_name";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of documents selected by a scan pass.
pub const SELECTED_COUNT: &str = "selected_count";

/// Number of extraction batches in a run.
pub const BATCH_COUNT: &str = "batch_count";

/// One-based index of the batch being processed.
pub const BATCH_INDEX: &str = "batch_index";

/// Number of entity candidates produced or reconciled.
pub const CANDIDATE_COUNT: &str = "candidate_count";

/// Number of parent lookups answered from the per-run cache.
pub const CACHE_HITS: &str = "cache_hits";

// ─── Reconciliation fields ─────────────────────────────────────────────────

/// Similarity score that drove a merge decision.
pub const SIMILARITY: &str = "similarity";

/// Canonical node an action targets.
pub const MERGE_TARGET: &str = "merge_target";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Set when a permissive fallback pass replaced the strict scan.
pub const DEGRADED: &str = "degraded";
