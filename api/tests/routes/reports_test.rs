use crate::helpers::app::RESPONSE;
use crate::helpers::{StubAnalyzer, make_test_app};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use reporter::ReportStrategy;
use reporter::docx::text::extract_text;
use std::sync::Arc;
use tower::ServiceExt;

fn text_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/reports")
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test Case: A stored AI response is rendered without calling the analyzer
#[tokio::test]
async fn test_raw_response_renders_report() {
    let analyzer = Arc::new(StubAnalyzer::answering("unused"));
    let app = make_test_app(analyzer.clone(), ReportStrategy::Generative);

    let response = app.oneshot(text_request(RESPONSE)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-report-status"], "complete");
    assert!(analyzer.seen_mime.lock().unwrap().is_none());

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = extract_text(&body).unwrap();
    assert!(text.contains("Competência 1"));
    assert!(text.contains("Revise a concordância."));
}

/// Test Case: Unnamed essays get a timestamped file name
#[tokio::test]
async fn test_unnamed_report_file_name() {
    let app = make_test_app(Arc::new(StubAnalyzer::answering("")), ReportStrategy::Generative);

    let response = app
        .oneshot(text_request("### Nota Estimada\n600"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"correcao_2"));
}

/// Test Case: Blank body
#[tokio::test]
async fn test_blank_body_is_bad_request() {
    let app = make_test_app(Arc::new(StubAnalyzer::answering("")), ReportStrategy::Generative);

    let response = app.oneshot(text_request("   ")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
