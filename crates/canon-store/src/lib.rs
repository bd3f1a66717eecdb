//! # canon-store
//!
//! Document-store-facing logic for canonweave: project-root resolution
//! over an external parent-pointer hierarchy, the administrative repair
//! pass that re-attaches orphaned graph records, and in-memory store
//! implementations used as test fixtures across the workspace.

pub mod cache;
pub mod memory;
pub mod repair;
pub mod resolver;

pub use cache::RootCache;
pub use memory::{InMemoryDocumentStore, InMemoryGraphStore};
pub use repair::{repair_unrooted, RepairReport, RepairRequest};
pub use resolver::resolve_root;
