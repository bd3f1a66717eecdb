//! Boundary traits for canonweave's external collaborators.
//!
//! The document store and the graph persistence layer are external
//! systems; these traits pin down exactly what the engine consumes from
//! them, enabling pluggable backends and testability. Implementations
//! must be `Send + Sync` — the engine holds them behind shared references
//! across await points.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{CanonicalNode, FolderNode, GraphRecord};

// =============================================================================
// DOCUMENT STORE
// =============================================================================

/// Read-side interface to the hierarchical document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Immediate parent of a folder, or `None` at the top of the hierarchy.
    ///
    /// Fails with [`crate::Error::PermissionDenied`] or
    /// [`crate::Error::NotFound`] when the folder is unreadable or deleted;
    /// the root resolver treats both as "resolution terminates here".
    async fn parent_of(&self, folder_id: &str) -> Result<Option<String>>;

    /// Fetch the folder/file tree under the given roots.
    ///
    /// The engine expects the caller to fetch the tree once before a scan;
    /// it does not page the store itself.
    async fn list_tree(&self, root_ids: &[String], recursive: bool) -> Result<Vec<FolderNode>>;
}

// =============================================================================
// GRAPH PERSISTENCE
// =============================================================================

/// One page of graph records whose project root is unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnrootedPage {
    pub records: Vec<GraphRecord>,
    /// Cursor for the next page; `None` when the listing is exhausted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<u64>,
}

/// Interface to the graph persistence layer.
///
/// Canonweave only reads the canonical set and writes back resolved roots;
/// accepting reconciled candidates into the graph is the caller's step.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// The canonical entity set for a project.
    async fn canonical_nodes(&self, project_id: &str) -> Result<Vec<CanonicalNode>>;

    /// Page through records whose `root_id` is unset.
    async fn list_unrooted(&self, limit: usize, cursor: Option<u64>) -> Result<UnrootedPage>;

    /// Write a resolved project root back to a record.
    async fn set_root(&self, record_id: &str, root_id: &str) -> Result<()>;
}
