//! Project-root resolution over the document store's parent pointers.
//!
//! Object-storage folder graphs are not necessarily rooted where the
//! application believes: shared drives, shortcuts, and manual
//! reorganization can place a document several hops from any known root.
//! The resolver answers "which tracked project owns this folder" by
//! walking parent links upward until it reaches a known root or the
//! hierarchy is exhausted.

use std::collections::HashSet;

use tracing::{debug, warn};

use canon_core::{DocumentStore, Result};

use crate::cache::RootCache;

/// Resolve the owning project root of a folder, or `None` when the folder
/// is legitimately outside every tracked project.
///
/// Walk behavior:
/// - a folder in `known_roots` resolves to itself immediately;
/// - a cached folder resolves without any store call;
/// - an unreadable or deleted parent (permission error, missing object)
///   terminates the walk as out-of-scope — logged at WARN, not retried,
///   never surfaced as an error;
/// - a revisited folder id within one call is a cycle in the parent chain:
///   the walk fails closed to `None`;
/// - every folder touched on the walk is cached with the final result
///   (path compression), so sibling resolutions sharing an ancestor chain
///   cost at most one store call per distinct folder across the run.
///
/// Other store failures propagate unchanged.
pub async fn resolve_root(
    store: &dyn DocumentStore,
    folder_id: &str,
    known_roots: &HashSet<String>,
    cache: &mut RootCache,
) -> Result<Option<String>> {
    let mut walked: Vec<String> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut current = folder_id.to_string();

    let root: Option<String> = loop {
        if known_roots.contains(&current) {
            break Some(current);
        }
        if let Some(cached) = cache.lookup(&current) {
            debug!(folder_id = %current, "Root resolution answered from cache");
            break cached;
        }
        if !visited.insert(current.clone()) {
            warn!(
                folder_id = %current,
                "Cycle detected in parent chain, treating walk as out of scope"
            );
            break None;
        }

        match store.parent_of(&current).await {
            Ok(Some(parent)) => {
                walked.push(current);
                current = parent;
            }
            Ok(None) => {
                // Top of hierarchy without meeting a known root
                walked.push(current);
                break None;
            }
            Err(e) if e.is_unreadable_object() => {
                warn!(
                    folder_id = %current,
                    error = %e,
                    "Parent unreadable, treating folder as out of scope"
                );
                walked.push(current);
                break None;
            }
            Err(e) => return Err(e),
        }
    };

    for id in walked {
        cache.insert(id, root.clone());
    }

    Ok(root)
}
