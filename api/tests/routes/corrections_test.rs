use crate::helpers::app::{PNG_BYTES, RESPONSE};
use crate::helpers::{StubAnalyzer, make_test_app, multipart_request};
use ai::AiError;
use axum::http::{StatusCode, header};
use reporter::ReportStrategy;
use reporter::docx::text::extract_text;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Test Case: A PNG upload is analysed and answered with the generated report
#[tokio::test]
async fn test_upload_returns_docx_report() {
    let analyzer = Arc::new(StubAnalyzer::answering(RESPONSE));
    let app = make_test_app(analyzer.clone(), ReportStrategy::Generative);

    let req = multipart_request("image", "redacao.png", "image/png", PNG_BYTES);
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        reporter::docx::DOCX_MIME
    );
    assert_eq!(response.headers()["x-report-status"], "complete");
    let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
    assert!(disposition.contains("filename*=UTF-8''correcao%5FJo%C3%A3o%5FSouza%2Edocx"));
    assert_eq!(analyzer.seen_mime.lock().unwrap().as_deref(), Some("image/png"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = extract_text(&body).unwrap();
    assert!(text.contains("João Souza"));
    assert!(text.contains("Os menino correu para o ônibus."));
    assert!(text.contains("720"));
}

/// Test Case: The image signature decides the type over a wrong declared content type
#[tokio::test]
async fn test_signature_overrides_declared_type() {
    let analyzer = Arc::new(StubAnalyzer::answering(RESPONSE));
    let app = make_test_app(analyzer.clone(), ReportStrategy::Generative);

    let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
    let req = multipart_request("image", "foto.png", "image/png", &jpeg);
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(analyzer.seen_mime.lock().unwrap().as_deref(), Some("image/jpeg"));
}

/// Test Case: A missing template still yields a document, flagged as fallback
#[tokio::test]
async fn test_missing_template_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let strategy = ReportStrategy::TemplateFill {
        template_path: dir.path().join("ausente.docx"),
    };
    let app = make_test_app(Arc::new(StubAnalyzer::answering(RESPONSE)), strategy);

    let req = multipart_request("image", "redacao.png", "image/png", PNG_BYTES);
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-report-status"], "fallback");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = extract_text(&body).unwrap();
    assert!(text.contains("Template not found"));
    assert!(text.contains(RESPONSE.trim_end()));
}

/// Test Case: Request without the `image` field
#[tokio::test]
async fn test_missing_image_field_is_bad_request() {
    let analyzer = Arc::new(StubAnalyzer::answering(RESPONSE));
    let app = make_test_app(analyzer.clone(), ReportStrategy::Generative);

    let req = multipart_request("foto", "redacao.png", "image/png", PNG_BYTES);
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("'image'"));
    assert!(analyzer.seen_mime.lock().unwrap().is_none());
}

/// Test Case: Empty upload
#[tokio::test]
async fn test_empty_image_is_bad_request() {
    let app = make_test_app(Arc::new(StubAnalyzer::answering(RESPONSE)), ReportStrategy::Generative);

    let req = multipart_request("image", "redacao.png", "image/png", b"");
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "Uploaded image is empty");
}

/// Test Case: Upload that is neither JPEG nor PNG
#[tokio::test]
async fn test_unsupported_type_is_rejected() {
    let app = make_test_app(Arc::new(StubAnalyzer::answering(RESPONSE)), ReportStrategy::Generative);

    let req = multipart_request("image", "redacao.gif", "image/gif", b"GIF89a....");
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

/// Test Case: The AI service fails
#[tokio::test]
async fn test_ai_failure_is_bad_gateway() {
    let analyzer = StubAnalyzer::failing(|| AiError::Api {
        status: 503,
        body: "overloaded".into(),
    });
    let app = make_test_app(Arc::new(analyzer), ReportStrategy::Generative);

    let req = multipart_request("image", "redacao.png", "image/png", PNG_BYTES);
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().starts_with("Essay analysis failed"));
}

/// Test Case: The AI client is not configured
#[tokio::test]
async fn test_missing_api_key_is_server_error() {
    let app = make_test_app(
        Arc::new(StubAnalyzer::failing(|| AiError::MissingApiKey)),
        ReportStrategy::Generative,
    );

    let req = multipart_request("image", "redacao.png", "image/png", PNG_BYTES);
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
