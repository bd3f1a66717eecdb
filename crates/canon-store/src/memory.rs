//! In-memory store implementations.
//!
//! Deterministic fixtures for the workspace's tests: a parent-pointer
//! document store with failure injection and a call counter, and a graph
//! store backed by plain vectors. Shipped in the crate rather than under
//! `#[cfg(test)]` so downstream crates can drive their own tests with them.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use canon_core::{
    CanonicalNode, DocumentStore, Error, FolderNode, GraphRecord, GraphStore, Result, UnrootedPage,
};

// =============================================================================
// DOCUMENT STORE
// =============================================================================

/// In-memory [`DocumentStore`] with explicit failure injection.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    parents: HashMap<String, Option<String>>,
    unreadable: HashSet<String>,
    trees: Vec<FolderNode>,
    parent_calls: AtomicU64,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a folder's parent link (`None` = top of hierarchy).
    pub fn with_parent(mut self, folder_id: impl Into<String>, parent: Option<&str>) -> Self {
        self.parents
            .insert(folder_id.into(), parent.map(|s| s.to_string()));
        self
    }

    /// Make a folder's parent lookup fail with `PermissionDenied`.
    pub fn with_unreadable(mut self, folder_id: impl Into<String>) -> Self {
        self.unreadable.insert(folder_id.into());
        self
    }

    /// Seed a tree returned by [`DocumentStore::list_tree`].
    pub fn with_tree(mut self, tree: FolderNode) -> Self {
        self.trees.push(tree);
        self
    }

    /// Number of `parent_of` calls served (including failures).
    pub fn parent_calls(&self) -> u64 {
        self.parent_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn parent_of(&self, folder_id: &str) -> Result<Option<String>> {
        self.parent_calls.fetch_add(1, Ordering::Relaxed);
        if self.unreadable.contains(folder_id) {
            return Err(Error::PermissionDenied(folder_id.to_string()));
        }
        match self.parents.get(folder_id) {
            Some(parent) => Ok(parent.clone()),
            None => Err(Error::NotFound(folder_id.to_string())),
        }
    }

    async fn list_tree(&self, root_ids: &[String], _recursive: bool) -> Result<Vec<FolderNode>> {
        if root_ids.is_empty() {
            return Ok(self.trees.clone());
        }
        Ok(self
            .trees
            .iter()
            .filter(|t| root_ids.iter().any(|r| r == &t.id))
            .cloned()
            .collect())
    }
}

// =============================================================================
// GRAPH STORE
// =============================================================================

/// In-memory [`GraphStore`] over plain vectors.
#[derive(Debug, Default)]
pub struct InMemoryGraphStore {
    records: Mutex<Vec<GraphRecord>>,
    canonical: Mutex<HashMap<String, Vec<CanonicalNode>>>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a graph record.
    pub fn with_record(self, record: GraphRecord) -> Self {
        self.records.lock().unwrap().push(record);
        self
    }

    /// Seed a canonical node for a project.
    pub fn with_canonical(self, project_id: impl Into<String>, node: CanonicalNode) -> Self {
        self.canonical
            .lock()
            .unwrap()
            .entry(project_id.into())
            .or_default()
            .push(node);
        self
    }

    /// Snapshot of all records, for assertions.
    pub fn records(&self) -> Vec<GraphRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Fetch one record by id, for assertions.
    pub fn record(&self, id: &str) -> Option<GraphRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn canonical_nodes(&self, project_id: &str) -> Result<Vec<CanonicalNode>> {
        Ok(self
            .canonical
            .lock()
            .unwrap()
            .get(project_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_unrooted(&self, limit: usize, cursor: Option<u64>) -> Result<UnrootedPage> {
        let records = self.records.lock().unwrap();
        let start = cursor.unwrap_or(0) as usize;
        let mut page = Vec::new();
        let mut next_cursor = None;

        for (i, record) in records.iter().enumerate().skip(start) {
            if page.len() == limit {
                next_cursor = Some(i as u64);
                break;
            }
            if record.root_id.is_none() {
                page.push(record.clone());
            }
        }

        Ok(UnrootedPage {
            records: page,
            next_cursor,
        })
    }

    async fn set_root(&self, record_id: &str, root_id: &str) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == record_id) {
            Some(record) => {
                record.root_id = Some(root_id.to_string());
                Ok(())
            }
            None => Err(Error::NotFound(record_id.to_string())),
        }
    }
}
