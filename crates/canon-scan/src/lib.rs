//! # canon-scan
//!
//! The canonical scanner: selects text-bearing documents transitively
//! contained in a project's canon folders from a pre-fetched tree, with a
//! permissive fallback pass that tolerates folder-identity mismatches.

pub mod config;
pub mod scanner;

pub use config::ScanConfig;
pub use scanner::{select_documents, ScanOutcome};
