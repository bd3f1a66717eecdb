//! Core data model for canonweave.
//!
//! These are the types that flow through the scan → extract → reconcile
//! pipeline, plus the graph-side records the administrative repair pass
//! operates on. Wire-facing types (the extraction request/response payloads)
//! live with the extraction backend; everything here is shared vocabulary.

use serde::{Deserialize, Serialize};

// =============================================================================
// DOCUMENT TREE
// =============================================================================

/// A node in the externally-supplied folder/file tree.
///
/// Read-only snapshot rebuilt by the document store on each scan request;
/// the engine never mutates it. Identifiers are opaque store identifiers,
/// stable but not guaranteed globally unique across drives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolderNode {
    /// Opaque external identifier.
    pub id: String,
    /// Display name, used to build slash-joined paths.
    pub name: String,
    /// Whether this node is a folder (files carry no children).
    pub is_folder: bool,
    /// Declared content type, when the store reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Child nodes, in store order. Present only for folders.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Construct a folder with children.
    pub fn folder(id: impl Into<String>, name: impl Into<String>, children: Vec<FolderNode>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_folder: true,
            mime_type: None,
            children,
        }
    }

    /// Construct a leaf file node.
    pub fn file(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_folder: false,
            mime_type: None,
            children: Vec::new(),
        }
    }

    /// Attach a declared content type.
    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = Some(mime.into());
        self
    }
}

// =============================================================================
// SELECTED DOCUMENTS
// =============================================================================

/// Context a document contributes to entity extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContextType {
    /// Prose: chapters, scenes, drafts.
    Narrative,
    /// Reference material: lore, character sheets, world rules.
    WorldDef,
}

impl std::fmt::Display for ContextType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Narrative => write!(f, "NARRATIVE"),
            Self::WorldDef => write!(f, "WORLD_DEF"),
        }
    }
}

/// A document chosen by the canonical scanner for entity extraction.
///
/// Created during the scan pass, consumed once by the batching extractor;
/// not persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedDocument {
    /// Store identifier of the file.
    pub id: String,
    /// File name.
    pub name: String,
    /// Slash-joined name chain from the scan root.
    pub full_path: String,
    /// Inferred extraction context.
    pub context_type: ContextType,
    /// Immediate containing folder, used for batching.
    pub parent_id: String,
}

// =============================================================================
// ENTITY CANDIDATES
// =============================================================================

/// Action the extraction service proposed for a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestedAction {
    Create,
    Merge,
}

/// A raw entity proposal from the extraction service.
///
/// `merge_with_id` may reference an identifier that is invalid or stale —
/// the extractor is free to point at its own ephemeral identifiers. The
/// reconciler resolves or downgrades it; it is never trusted as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntityCandidate {
    /// Candidate identifier. Absent when the extraction service did not
    /// supply one; filled in downstream so every candidate is addressable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Proposed entity name, as found in the source text.
    pub name: String,
    /// Entity taxonomy label (e.g. "Character", "Location", "Object").
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Extractor confidence, 0–100.
    pub confidence: u8,
    /// Free-text rationale from the extractor.
    #[serde(default)]
    pub reasoning: String,
    /// Evidence snippets naming the files the entity was found in.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub found_in_files: Vec<String>,
    /// Extractor-proposed action, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<SuggestedAction>,
    /// Extractor-proposed merge target, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_with_id: Option<String>,
}

// =============================================================================
// CANONICAL GRAPH
// =============================================================================

/// An existing graph entity: the authoritative set candidates are matched
/// against.
///
/// Invariant: no two canonical nodes should have equal normalized names or
/// similarity above the merge threshold — the reconciler exists precisely
/// to keep this invariant from being violated as candidates are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalNode {
    /// Content-derived identifier (see `identity::entity_id`).
    pub id: String,
    /// Canonical entity name.
    pub name: String,
}

/// A persisted graph record as seen by the administrative repair pass.
///
/// `root_id` is unset for fragments created before their folder's project
/// scope could be established.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphRecord {
    pub id: String,
    pub name: String,
    /// Folder the record's source document lives in, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    /// Project root that owns this record, once resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_id: Option<String>,
}

// =============================================================================
// RECONCILIATION OUTCOMES
// =============================================================================

/// Ambiguity classification attached to a reconciled candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ambiguity {
    /// No canonical counterpart detected.
    New,
    /// Flagged as a probable duplicate of an existing node.
    Conflict,
}

/// Exhaustively matchable reconciliation outcome for one candidate.
///
/// The three outcomes are explicit variants rather than optional-field
/// combinations, so downstream acceptance code cannot half-handle them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Accept as a new canonical node.
    Create,
    /// Merge into an existing canonical node.
    Merge {
        /// Real identifier of the canonical target.
        target_id: String,
        /// Canonical target name, for human review.
        target_name: String,
        /// Similarity score when the match came from fuzzy linkage;
        /// `None` when the extractor suggested the merge itself.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        similarity: Option<f64>,
    },
    /// An extractor-suggested merge whose target could not be resolved;
    /// safely degraded to a create.
    MergeDowngraded {
        /// Why the suggestion could not be honored.
        reason: String,
    },
}

/// A candidate annotated with its reconciliation outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReconciledCandidate {
    /// The candidate, with `id` guaranteed present and `reasoning`
    /// extended where the outcome warranted an explanation.
    pub candidate: EntityCandidate,
    /// What should happen to it.
    pub resolution: Resolution,
}

impl ReconciledCandidate {
    /// Ambiguity classification derived from the outcome.
    ///
    /// Only fuzzy-linkage merges are conflicts; an extractor-suggested merge
    /// that resolved cleanly carries no ambiguity detected on our side.
    pub fn ambiguity(&self) -> Ambiguity {
        match &self.resolution {
            Resolution::Merge {
                similarity: Some(_),
                ..
            } => Ambiguity::Conflict,
            _ => Ambiguity::New,
        }
    }

    /// Action the caller should take, with downgrades already applied.
    pub fn action(&self) -> SuggestedAction {
        match &self.resolution {
            Resolution::Merge { .. } => SuggestedAction::Merge,
            Resolution::Create | Resolution::MergeDowngraded { .. } => SuggestedAction::Create,
        }
    }

    /// Resolved merge target, when the outcome is a merge.
    pub fn merge_target(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Merge { target_id, .. } => Some(target_id),
            _ => None,
        }
    }
}
