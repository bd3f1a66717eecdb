//! Candidate reconciliation against the canonical entity set.
//!
//! Two independent paths per candidate:
//!
//! *Suggested merge* — the extractor proposed a merge target. The target
//! identifier is resolved against the canonical set (by id, then by
//! normalized name — extractors are known to reference their own
//! ephemeral identifiers). Unresolvable suggestions are downgraded to
//! creates with an explanation: they must never silently disappear and
//! never leave a dangling reference.
//!
//! *Unsuggested* — fuzzy linkage by normalized edit-distance similarity.
//! A best match above the merge threshold flags the candidate as a
//! conflict; anything else passes through as a create. The threshold is
//! biased toward false negatives on purpose: a missed duplicate is cheap
//! to merge manually, a false merge corrupts an entity's history.

use tracing::{debug, info};

use canon_core::{
    defaults, entity_id, normalize_name, name_similarity, CanonicalNode, EntityCandidate,
    ReconciledCandidate, Resolution, SuggestedAction,
};

/// Reconcile extracted candidates against the canonical node set.
///
/// Pure transformation: candidates come back annotated with an explicit
/// [`Resolution`], ids guaranteed present (content-derived when absent),
/// and reasoning extended where an outcome warranted an explanation.
pub fn reconcile(
    candidates: Vec<EntityCandidate>,
    canonical_nodes: &[CanonicalNode],
    project_id: &str,
) -> Vec<ReconciledCandidate> {
    let reconciled: Vec<ReconciledCandidate> = candidates
        .into_iter()
        .map(|c| reconcile_one(c, canonical_nodes, project_id))
        .collect();

    let merges = reconciled
        .iter()
        .filter(|r| matches!(r.resolution, Resolution::Merge { .. }))
        .count();
    let downgrades = reconciled
        .iter()
        .filter(|r| matches!(r.resolution, Resolution::MergeDowngraded { .. }))
        .count();
    info!(
        candidate_count = reconciled.len(),
        merges,
        downgrades,
        "Reconciliation finished"
    );

    reconciled
}

fn reconcile_one(
    mut candidate: EntityCandidate,
    canonical_nodes: &[CanonicalNode],
    project_id: &str,
) -> ReconciledCandidate {
    if candidate.id.as_deref().map_or(true, str::is_empty) {
        candidate.id = Some(entity_id(
            project_id,
            &candidate.name,
            &candidate.entity_type,
        ));
    }

    let suggested_target = match (candidate.suggested_action, candidate.merge_with_id.clone()) {
        (Some(SuggestedAction::Merge), Some(target)) => Some(target),
        _ => None,
    };

    if let Some(target) = suggested_target {
        resolve_suggested_merge(candidate, &target, canonical_nodes)
    } else {
        link_by_similarity(candidate, canonical_nodes)
    }
}

/// Resolve an extractor-suggested merge target, or downgrade.
fn resolve_suggested_merge(
    mut candidate: EntityCandidate,
    target: &str,
    canonical_nodes: &[CanonicalNode],
) -> ReconciledCandidate {
    let by_id = canonical_nodes.iter().find(|n| n.id == target);
    let matched = by_id.or_else(|| {
        // The extractor may have put a name where an id belongs
        let wanted = normalize_name(target);
        canonical_nodes
            .iter()
            .find(|n| normalize_name(&n.name) == wanted)
    });

    match matched {
        Some(node) => {
            debug!(
                candidate_name = %candidate.name,
                merge_target = %node.id,
                "Suggested merge resolved against canonical set"
            );
            candidate.merge_with_id = Some(node.id.clone());
            let resolution = Resolution::Merge {
                target_id: node.id.clone(),
                target_name: node.name.clone(),
                similarity: None,
            };
            ReconciledCandidate {
                candidate,
                resolution,
            }
        }
        None => {
            debug!(
                candidate_name = %candidate.name,
                merge_target = %target,
                "Suggested merge target unresolvable, downgrading to create"
            );
            let reason = format!(
                "Suggested merge target '{target}' does not match any canonical \
                 entity; downgraded to create."
            );
            candidate.suggested_action = Some(SuggestedAction::Create);
            candidate.merge_with_id = None;
            append_reasoning(&mut candidate, &reason);
            ReconciledCandidate {
                candidate,
                resolution: Resolution::MergeDowngraded { reason },
            }
        }
    }
}

/// Fuzzy linkage for candidates with no merge suggestion.
fn link_by_similarity(
    mut candidate: EntityCandidate,
    canonical_nodes: &[CanonicalNode],
) -> ReconciledCandidate {
    let normalized = normalize_name(&candidate.name);

    let mut best: Option<(&CanonicalNode, f64)> = None;
    for node in canonical_nodes {
        let score = name_similarity(&normalized, &normalize_name(&node.name));
        // Strictly greater: the first best wins, deterministically
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((node, score));
        }
    }

    match best {
        Some((node, score)) if score > defaults::MERGE_THRESHOLD => {
            debug!(
                candidate_name = %candidate.name,
                merge_target = %node.id,
                similarity = score,
                "Candidate flagged as probable duplicate"
            );
            candidate.suggested_action = Some(SuggestedAction::Merge);
            candidate.merge_with_id = Some(node.id.clone());
            append_reasoning(
                &mut candidate,
                &format!(
                    "Name matches existing entity '{}' with {:.0}% similarity.",
                    node.name,
                    score * 100.0
                ),
            );
            let resolution = Resolution::Merge {
                target_id: node.id.clone(),
                target_name: node.name.clone(),
                similarity: Some(score),
            };
            ReconciledCandidate {
                candidate,
                resolution,
            }
        }
        _ => ReconciledCandidate {
            candidate,
            resolution: Resolution::Create,
        },
    }
}

fn append_reasoning(candidate: &mut EntityCandidate, note: &str) {
    if candidate.reasoning.is_empty() {
        candidate.reasoning = note.to_string();
    } else {
        candidate.reasoning = format!("{} {note}", candidate.reasoning);
    }
}
