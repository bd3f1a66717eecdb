//! Scanner configuration.

use serde::{Deserialize, Serialize};

use canon_core::{defaults, ContextKeywords};

/// Configuration for the canonical scanner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    /// File extensions (lowercase, no dot) treated as text-bearing.
    pub text_extensions: Vec<String>,
    /// Declared content-type prefix treated as text-bearing.
    pub text_mime_prefix: String,
    /// Keyword list for context-type inference.
    pub keywords: ContextKeywords,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            text_extensions: defaults::TEXT_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            text_mime_prefix: defaults::TEXT_MIME_PREFIX.to_string(),
            keywords: ContextKeywords::default(),
        }
    }
}

impl ScanConfig {
    /// Replace the text-bearing extension list.
    pub fn with_text_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_extensions = extensions
            .into_iter()
            .map(|s| s.into().to_lowercase())
            .collect();
        self
    }

    /// Replace the keyword configuration.
    pub fn with_keywords(mut self, keywords: ContextKeywords) -> Self {
        self.keywords = keywords;
        self
    }
}
