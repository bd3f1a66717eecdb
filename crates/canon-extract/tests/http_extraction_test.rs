//! Integration tests for the extraction-service HTTP client, against a
//! wiremock server.

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use canon_core::{ContextType, Error};
use canon_extract::{ExtractionBackend, ExtractionRequest, HttpExtractionBackend};

fn request(files: &[&str]) -> ExtractionRequest {
    ExtractionRequest {
        file_ids: files.iter().map(|s| s.to_string()).collect(),
        project_id: "p1".to_string(),
        context_type: ContextType::WorldDef,
        ignored_terms: vec!["the kingdom".to_string()],
    }
}

#[tokio::test]
async fn extract_posts_request_and_parses_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/extract"))
        .and(body_partial_json(serde_json::json!({
            "file_ids": ["f1", "f2"],
            "project_id": "p1",
            "context_type": "WORLD_DEF",
            "ignored_terms": ["the kingdom"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [
                {
                    "name": "Excalibur",
                    "type": "Object",
                    "confidence": 91,
                    "reasoning": "named in two chapters",
                    "found_in_files": ["chapter-01.md"]
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = HttpExtractionBackend::new(server.uri());
    let response = backend.extract(&request(&["f1", "f2"])).await.unwrap();

    assert_eq!(response.candidates.len(), 1);
    let candidate = &response.candidates[0];
    assert_eq!(candidate.name, "Excalibur");
    assert_eq!(candidate.entity_type, "Object");
    assert_eq!(candidate.confidence, 91);
    assert!(candidate.id.is_none());
}

#[tokio::test]
async fn extract_non_success_status_is_extraction_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/extract"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let backend = HttpExtractionBackend::new(server.uri());
    let err = backend.extract(&request(&["f1"])).await.unwrap_err();

    match err {
        Error::Extraction(msg) => {
            assert!(msg.contains("502"), "message should carry status: {msg}");
        }
        other => panic!("expected Extraction error, got {other:?}"),
    }
}

#[tokio::test]
async fn extract_malformed_payload_is_extraction_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/extract"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let backend = HttpExtractionBackend::new(server.uri());
    let err = backend.extract(&request(&["f1"])).await.unwrap_err();
    assert!(matches!(err, Error::Extraction(_)));
}

#[tokio::test]
async fn health_check_true_only_for_healthy_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "healthy"})),
        )
        .mount(&server)
        .await;

    let backend = HttpExtractionBackend::new(server.uri());
    assert!(backend.health_check().await.unwrap());
}

#[tokio::test]
async fn health_check_false_for_degraded_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "starting"})),
        )
        .mount(&server)
        .await;

    let backend = HttpExtractionBackend::new(server.uri());
    assert!(!backend.health_check().await.unwrap());
}

#[tokio::test]
async fn health_check_false_when_unreachable() {
    // Port 1 is never bound in the test environment
    let backend = HttpExtractionBackend::new("http://127.0.0.1:1".to_string());
    assert!(!backend.health_check().await.unwrap());
}
