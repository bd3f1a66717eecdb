//! Content-derived deterministic identity for graph entities.
//!
//! Reprocessing the same logical entity must never mint a second identity:
//! the id is a hash over the owning project and the normalized name and
//! type, so case, whitespace, and diacritic variation across source
//! documents all collapse to one identifier.

use sha2::{Digest, Sha256};

use crate::normalize::normalize_name;

/// Deterministic identifier for an entity within a project.
///
/// `entity_id(p, name, type)` is stable across calls and across input
/// variants that normalize equally:
///
/// ```
/// use canon_core::entity_id;
///
/// assert_eq!(
///     entity_id("p1", "Excalibur", "Object"),
///     entity_id("p1", " excalibur ", "OBJECT"),
/// );
/// ```
pub fn entity_id(project_id: &str, name: &str, entity_type: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(project_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(normalize_name(name).as_bytes());
    hasher.update([0u8]);
    hasher.update(normalize_name(entity_type).as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_across_case_and_whitespace() {
        assert_eq!(
            entity_id("p1", "Excalibur", "Object"),
            entity_id("p1", " excalibur ", "OBJECT"),
        );
    }

    #[test]
    fn test_stable_across_diacritics() {
        assert_eq!(
            entity_id("p1", "Éowyn", "Character"),
            entity_id("p1", "Eowyn", "character"),
        );
    }

    #[test]
    fn test_distinct_projects_distinct_ids() {
        assert_ne!(
            entity_id("p1", "Excalibur", "Object"),
            entity_id("p2", "Excalibur", "Object"),
        );
    }

    #[test]
    fn test_distinct_types_distinct_ids() {
        assert_ne!(
            entity_id("p1", "Avalon", "Location"),
            entity_id("p1", "Avalon", "Faction"),
        );
    }

    #[test]
    fn test_field_separator_prevents_concatenation_collisions() {
        assert_ne!(entity_id("p1", "ab", "c"), entity_id("p1", "a", "bc"));
    }

    #[test]
    fn test_id_is_hex_sha256() {
        let id = entity_id("p1", "Excalibur", "Object");
        assert_eq!(id.len(), 64);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
