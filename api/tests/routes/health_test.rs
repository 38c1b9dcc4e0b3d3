use crate::helpers::{StubAnalyzer, make_test_app};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use reporter::ReportStrategy;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = make_test_app(Arc::new(StubAnalyzer::answering("")), ReportStrategy::Generative);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"], "OK");
}
