//! # canon-recon
//!
//! The reconciliation engine: decides, per extracted candidate, whether it
//! is a new canonical entity, a duplicate of an existing one, or an
//! extractor merge suggestion that must be safely degraded — and composes
//! the full scan → extract → reconcile pipeline.

pub mod engine;
pub mod reconcile;

pub use engine::{ProgressCallback, ReconEngine, RunOptions, RunSummary, ScanEvent};
pub use reconcile::reconcile;
