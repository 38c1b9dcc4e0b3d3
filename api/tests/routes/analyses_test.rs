use crate::helpers::app::RESPONSE;
use crate::helpers::{StubAnalyzer, make_test_app};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use reporter::ReportStrategy;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Test Case: Parsed fields come back in the JSON envelope
#[tokio::test]
async fn test_analysis_is_returned_as_json() {
    let app = make_test_app(Arc::new(StubAnalyzer::answering("")), ReportStrategy::Generative);

    let req = Request::builder()
        .method("POST")
        .uri("/api/analyses")
        .body(Body::from(RESPONSE))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["success"], true);
    let data = &json["data"];
    assert_eq!(data["student_name"], "João Souza");
    assert_eq!(data["estimated_score"], "720");
    assert_eq!(data["criteria"][0]["id"], 1);
    assert_eq!(data["criteria"][0]["score_text"], "120");
    assert_eq!(data["criteria"][0]["flagged_excerpts"][0], "Os menino correu");
}
