//! Context-type inference from document paths.
//!
//! A heuristic, not a guarantee: paths containing world-definition keywords
//! (lore, character sheets, rules) are tagged [`ContextType::WorldDef`],
//! everything else is narrative. The keyword list is configuration so the
//! taxonomy can grow without touching traversal code.

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::models::ContextType;

/// Configurable keyword list driving context-type inference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextKeywords {
    /// Lowercase substrings that mark a path as world-definition material.
    pub world_def: Vec<String>,
}

impl Default for ContextKeywords {
    fn default() -> Self {
        Self {
            world_def: defaults::WORLD_DEF_KEYWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ContextKeywords {
    /// Replace the world-definition keyword list.
    pub fn with_world_def<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.world_def = keywords
            .into_iter()
            .map(|s| s.into().to_lowercase())
            .collect();
        self
    }
}

/// Infer the extraction context for a document from its full path.
///
/// Case-insensitive substring match against the configured keywords.
pub fn infer_context_type(full_path: &str, keywords: &ContextKeywords) -> ContextType {
    let path = full_path.to_lowercase();
    if keywords.world_def.iter().any(|kw| path.contains(kw)) {
        ContextType::WorldDef
    } else {
        ContextType::Narrative
    }
}
