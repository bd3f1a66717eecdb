//! End-to-end pipeline tests: tree → scan → batched extraction →
//! reconciliation, over in-memory stores and a scripted extraction
//! backend.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use canon_core::{
    CanonicalNode, ContextType, EntityCandidate, FolderNode, Resolution, SuggestedAction,
};
use canon_extract::mock::{candidate, MockExtractionBackend};
use canon_recon::{ReconEngine, RunOptions, ScanEvent};
use canon_store::InMemoryGraphStore;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("canon_recon=debug,canon_extract=debug,canon_scan=debug")
        .with_test_writer()
        .try_init();
}

fn canon_roots(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn sample_tree() -> Vec<FolderNode> {
    vec![FolderNode::folder(
        "root",
        "Project",
        vec![FolderNode::folder(
            "canon",
            "Canon",
            vec![
                FolderNode::folder(
                    "act-1",
                    "Act I",
                    vec![
                        FolderNode::file("f1", "chapter-01.md"),
                        FolderNode::file("f2", "chapter-02.md"),
                    ],
                ),
                FolderNode::folder("lore", "Lore", vec![FolderNode::file("f3", "gods.md")]),
            ],
        )],
    )]
}

fn suggested_merge(name: &str, target: &str) -> EntityCandidate {
    let mut c = candidate(name, "Character", 85);
    c.suggested_action = Some(SuggestedAction::Merge);
    c.merge_with_id = Some(target.to_string());
    c
}

#[tokio::test]
async fn full_pipeline_reconciles_against_canonical_set() {
    init_tracing();

    let graph = Arc::new(InMemoryGraphStore::new().with_canonical(
        "p1",
        CanonicalNode {
            id: "n-morgana".to_string(),
            name: "Morgana".to_string(),
        },
    ));
    let backend = Arc::new(
        MockExtractionBackend::new()
            // Batch for Act I: a near-duplicate of an existing entity
            .with_candidates_for_file("f1", vec![candidate("Morganna", "Character", 88)])
            // Batch for Lore: a genuinely new entity
            .with_candidates_for_file("f3", vec![candidate("Avalon", "Location", 92)]),
    );
    let engine = ReconEngine::new(graph, backend.clone());

    let options = RunOptions::new("p1", canon_roots(&["canon"]));
    let summary = engine.run(&sample_tree(), &options).await.unwrap();

    assert_eq!(summary.documents_selected, 3);
    assert!(!summary.degraded);
    assert!(!summary.cancelled);
    assert_eq!(summary.batches.len(), 2);
    assert_eq!(summary.batches_failed(), 0);

    // Two batches: act-1 (f1, f2) then lore (f3)
    let calls = backend.calls();
    assert_eq!(calls[0].file_ids, vec!["f1", "f2"]);
    assert_eq!(calls[0].context_type, ContextType::Narrative);
    assert_eq!(calls[1].file_ids, vec!["f3"]);
    assert_eq!(calls[1].context_type, ContextType::WorldDef);

    // "Morganna" vs "Morgana": 1 − 1/8 = 0.875 > 0.85 → conflict merge
    let morganna = summary
        .reconciled
        .iter()
        .find(|r| r.candidate.name == "Morganna")
        .unwrap();
    match &morganna.resolution {
        Resolution::Merge {
            target_id,
            similarity,
            ..
        } => {
            assert_eq!(target_id, "n-morgana");
            assert!(similarity.unwrap() > 0.85);
        }
        other => panic!("expected merge, got {other:?}"),
    }

    let avalon = summary
        .reconciled
        .iter()
        .find(|r| r.candidate.name == "Avalon")
        .unwrap();
    assert_eq!(avalon.resolution, Resolution::Create);
    assert!(avalon.candidate.id.is_some());
}

#[tokio::test]
async fn degraded_scan_is_surfaced_through_events() {
    let graph = Arc::new(InMemoryGraphStore::new());
    let backend = Arc::new(MockExtractionBackend::new());
    let engine = ReconEngine::new(graph, backend);

    let events: Arc<Mutex<Vec<ScanEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();

    // Canon root configured with an id the tree does not contain
    let options = RunOptions::new("p1", canon_roots(&["shortcut-id"]))
        .with_progress(move |e| sink.lock().unwrap().push(e.clone()));
    let summary = engine.run(&sample_tree(), &options).await.unwrap();

    assert!(summary.degraded);
    assert_eq!(summary.documents_selected, 3);

    let events = events.lock().unwrap();
    assert_eq!(events[0], ScanEvent::ScanDegraded);
    assert!(events.contains(&ScanEvent::ScanFinished { selected: 3 }));
}

#[tokio::test]
async fn batch_failure_yields_partial_results_and_full_progress() {
    let graph = Arc::new(InMemoryGraphStore::new());
    let backend = Arc::new(
        MockExtractionBackend::new()
            .with_candidates_for_file("f1", vec![candidate("Morgana", "Character", 90)])
            .with_failure_for_file("f3"),
    );
    let engine = ReconEngine::new(graph, backend);

    let events: Arc<Mutex<Vec<ScanEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let options = RunOptions::new("p1", canon_roots(&["canon"]))
        .with_progress(move |e| sink.lock().unwrap().push(e.clone()));

    let summary = engine.run(&sample_tree(), &options).await.unwrap();

    assert_eq!(summary.batches.len(), 2);
    assert_eq!(summary.batches_failed(), 1);
    assert_eq!(summary.reconciled.len(), 1);
    assert_eq!(summary.reconciled[0].candidate.name, "Morgana");

    // Progress still reported every batch
    let events = events.lock().unwrap();
    assert!(events.contains(&ScanEvent::BatchFinished {
        processed: 1,
        total: 2
    }));
    assert!(events.contains(&ScanEvent::BatchFinished {
        processed: 2,
        total: 2
    }));
    assert!(events.contains(&ScanEvent::RunFinished {
        candidates: 1,
        cancelled: false
    }));
}

#[tokio::test]
async fn cancellation_between_batches_returns_partial_run() {
    let graph = Arc::new(InMemoryGraphStore::new());
    let backend = Arc::new(
        MockExtractionBackend::new()
            .with_candidates_for_file("f1", vec![candidate("Morgana", "Character", 90)])
            .with_candidates_for_file("f3", vec![candidate("Avalon", "Location", 80)]),
    );
    let engine = ReconEngine::new(graph, backend.clone());

    let token = CancellationToken::new();
    let cancel_after_first = token.clone();
    let options = RunOptions::new("p1", canon_roots(&["canon"]))
        .with_cancel(token)
        .with_progress(move |e| {
            if matches!(e, ScanEvent::BatchFinished { processed: 1, .. }) {
                cancel_after_first.cancel();
            }
        });

    let summary = engine.run(&sample_tree(), &options).await.unwrap();

    assert!(summary.cancelled);
    assert_eq!(summary.batches.len(), 1);
    assert_eq!(backend.call_count(), 1);
    // The first batch's work is still reconciled and returned
    assert_eq!(summary.reconciled.len(), 1);
}

#[tokio::test]
async fn unresolvable_suggestion_is_downgraded_end_to_end() {
    let graph = Arc::new(InMemoryGraphStore::new().with_canonical(
        "p1",
        CanonicalNode {
            id: "n-morgana".to_string(),
            name: "Morgana".to_string(),
        },
    ));
    let backend = Arc::new(MockExtractionBackend::new().with_candidates_for_file(
        "f1",
        vec![
            suggested_merge("Morgan le Fay", "n-morgana"),
            suggested_merge("Accolon", "ghost-id"),
        ],
    ));
    let engine = ReconEngine::new(graph, backend);

    let options = RunOptions::new("p1", canon_roots(&["canon"]));
    let summary = engine.run(&sample_tree(), &options).await.unwrap();

    let resolved = summary
        .reconciled
        .iter()
        .find(|r| r.candidate.name == "Morgan le Fay")
        .unwrap();
    assert!(matches!(resolved.resolution, Resolution::Merge { .. }));

    let downgraded = summary
        .reconciled
        .iter()
        .find(|r| r.candidate.name == "Accolon")
        .unwrap();
    assert!(matches!(
        downgraded.resolution,
        Resolution::MergeDowngraded { .. }
    ));
    assert_eq!(
        downgraded.candidate.suggested_action,
        Some(SuggestedAction::Create)
    );
    assert!(downgraded.candidate.merge_with_id.is_none());
    assert!(downgraded.candidate.reasoning.contains("ghost-id"));
}

#[tokio::test]
async fn empty_tree_produces_empty_summary() {
    let graph = Arc::new(InMemoryGraphStore::new());
    let backend = Arc::new(MockExtractionBackend::new());
    let engine = ReconEngine::new(graph, backend.clone());

    let options = RunOptions::new("p1", canon_roots(&["canon"]));
    let summary = engine.run(&[], &options).await.unwrap();

    assert_eq!(summary.documents_selected, 0);
    assert!(!summary.degraded);
    assert!(summary.batches.is_empty());
    assert!(summary.reconciled.is_empty());
    assert_eq!(backend.call_count(), 0);
}
