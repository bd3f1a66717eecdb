//! Entity-name normalization for matching and identity.
//!
//! Two names refer to the same entity when their normalized forms are
//! equal: matching is case-insensitive, diacritic-insensitive (canonical
//! decomposition, combining marks dropped), and ignores hyphens and
//! underscores. The same normalization feeds both fuzzy matching and
//! content-derived identity, so the two can never disagree.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize an entity name for comparison.
///
/// Lowercase, NFD-decompose, drop combining marks, drop `-`/`_`, trim.
///
/// # Example
///
/// ```
/// use canon_core::normalize_name;
///
/// assert_eq!(normalize_name("  Mor-gana "), "morgana");
/// assert_eq!(normalize_name("Éowyn"), "eowyn");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .trim()
        .to_string()
}
