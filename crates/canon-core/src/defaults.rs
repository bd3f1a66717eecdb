//! Centralized default constants for the canonweave system.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates should reference these constants instead of defining
//! their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// RECONCILIATION
// =============================================================================

/// Similarity threshold above which an unsuggested candidate is flagged as a
/// probable duplicate of an existing canonical node. Strictly greater-than:
/// a score of exactly 0.85 stays a create. Biased toward false negatives —
/// a missed duplicate is cheaper to merge manually than a false merge is to
/// untangle.
pub const MERGE_THRESHOLD: f64 = 0.85;

// =============================================================================
// SCANNING
// =============================================================================

/// File extensions treated as text-bearing by the canonical scanner.
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "rst", "fountain"];

/// Declared content-type prefix treated as text-bearing.
pub const TEXT_MIME_PREFIX: &str = "text/";

/// Path keywords that tag a document as world-definition material rather
/// than narrative. Matched case-insensitively against the full path.
pub const WORLD_DEF_KEYWORDS: &[&str] = &[
    "lore",
    "character",
    "rule",
    "world",
    "glossary",
    "codex",
];

// =============================================================================
// EXTRACTION
// =============================================================================

/// Default extraction-service base URL.
pub const EXTRACTOR_URL: &str = "http://127.0.0.1:8090";

/// Timeout for one extraction batch request in seconds.
pub const EXTRACT_TIMEOUT_SECS: u64 = 120;

/// Timeout for extraction-service health checks in seconds.
pub const HEALTH_TIMEOUT_SECS: u64 = 5;

/// Environment variable naming the extraction-service base URL.
/// Set to empty string to disable the HTTP backend.
pub const ENV_EXTRACTOR_URL: &str = "CANON_EXTRACTOR_URL";

// =============================================================================
// REPAIR
// =============================================================================

/// Default page size for the administrative re-rooting pass.
pub const REPAIR_SCAN_LIMIT: usize = 200;
