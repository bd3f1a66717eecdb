//! Canon-scoped document selection.
//!
//! Recursive descent over the pre-fetched tree, carrying canon membership
//! down the recursion: a folder is canon if it is a configured canon root
//! or if its parent was already canon. A file is selected iff it is
//! text-bearing and its containing folder is canon.
//!
//! When the strict pass selects nothing from a non-empty tree, the
//! configured canon-root ids did not match the tree — typically the root
//! was reached through an object reference (shortcut) whose id differs
//! from the folder's own. The scanner then re-runs treating every folder
//! as canon and flags the outcome degraded; the fallback is never silent.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use canon_core::{infer_context_type, FolderNode, SelectedDocument};

use crate::config::ScanConfig;

/// Result of a scan over one tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutcome {
    /// Documents selected for extraction, in tree order.
    pub documents: Vec<SelectedDocument>,
    /// True when the permissive fallback pass replaced the strict pass.
    pub degraded: bool,
}

/// Select extraction-worthy documents from a pre-fetched tree.
pub fn select_documents(
    tree: &[FolderNode],
    canon_root_ids: &HashSet<String>,
    config: &ScanConfig,
) -> ScanOutcome {
    let documents = run_pass(tree, canon_root_ids, config, false);
    if !documents.is_empty() {
        debug!(
            selected_count = documents.len(),
            "Strict canon scan selected documents"
        );
        return ScanOutcome {
            documents,
            degraded: false,
        };
    }

    if !contains_file(tree) {
        return ScanOutcome {
            documents,
            degraded: false,
        };
    }

    warn!(
        canon_roots = canon_root_ids.len(),
        "Strict canon scan selected nothing from a non-empty tree, \
         falling back to permissive scan"
    );
    let documents = run_pass(tree, canon_root_ids, config, true);
    ScanOutcome {
        documents,
        degraded: true,
    }
}

fn run_pass(
    tree: &[FolderNode],
    canon_root_ids: &HashSet<String>,
    config: &ScanConfig,
    force_all: bool,
) -> Vec<SelectedDocument> {
    let mut selected = Vec::new();
    for node in tree {
        if node.is_folder {
            walk(node, canon_root_ids, config, force_all, false, "", &mut selected);
        } else {
            // A file at the scan root has no containing folder to batch by
            debug!(file_id = %node.id, "Ignoring file outside any folder");
        }
    }
    selected
}

#[allow(clippy::too_many_arguments)]
fn walk(
    folder: &FolderNode,
    canon_root_ids: &HashSet<String>,
    config: &ScanConfig,
    force_all: bool,
    parent_canon: bool,
    path_prefix: &str,
    selected: &mut Vec<SelectedDocument>,
) {
    let canon = force_all || parent_canon || canon_root_ids.contains(&folder.id);
    let path = join_path(path_prefix, &folder.name);
    trace!(folder_id = %folder.id, canon, path = %path, "Scanning folder");

    for child in &folder.children {
        if child.is_folder {
            walk(
                child,
                canon_root_ids,
                config,
                force_all,
                canon,
                &path,
                selected,
            );
        } else if canon && is_text_bearing(child, config) {
            let full_path = join_path(&path, &child.name);
            let context_type = infer_context_type(&full_path, &config.keywords);
            selected.push(SelectedDocument {
                id: child.id.clone(),
                name: child.name.clone(),
                full_path,
                context_type,
                // The immediate parent, independent of where canon began
                parent_id: folder.id.clone(),
            });
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

fn is_text_bearing(file: &FolderNode, config: &ScanConfig) -> bool {
    if let Some(mime) = &file.mime_type {
        if mime.starts_with(&config.text_mime_prefix) {
            return true;
        }
    }
    match file.name.rsplit_once('.') {
        Some((_, ext)) => config
            .text_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

fn contains_file(tree: &[FolderNode]) -> bool {
    tree.iter()
        .any(|n| !n.is_folder || contains_file(&n.children))
}
