//! Caller-owned cache for root resolution.
//!
//! One cache per resolution run. It is deliberately an explicit value the
//! caller constructs and passes in — never module-level state — so
//! concurrent runs for different users or projects cannot interfere. The
//! in-memory cache lives for the run and is then discarded; a durable
//! variant would persist the same mapping as scoped key-value state and
//! invalidate it whenever the folder hierarchy changes.

use std::collections::HashMap;

/// Memoized folder → resolved-root mapping.
///
/// `None` values are meaningful: they record that a folder was walked and
/// found to be outside every tracked project, so siblings sharing that
/// ancestry resolve in O(1) without further store calls.
#[derive(Debug, Default)]
pub struct RootCache {
    entries: HashMap<String, Option<String>>,
    hits: u64,
}

impl RootCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a folder, counting a hit when present.
    ///
    /// Outer `None` = never resolved; `Some(None)` = resolved out-of-scope.
    pub fn lookup(&mut self, folder_id: &str) -> Option<Option<String>> {
        let found = self.entries.get(folder_id).cloned();
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    /// Record a resolution result for a folder.
    pub fn insert(&mut self, folder_id: impl Into<String>, root: Option<String>) {
        self.entries.insert(folder_id.into(), root);
    }

    /// Whether a folder has a recorded result.
    pub fn contains(&self, folder_id: &str) -> bool {
        self.entries.contains_key(folder_id)
    }

    /// Number of folders with recorded results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }
}
