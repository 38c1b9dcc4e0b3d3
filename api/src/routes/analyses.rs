use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use reporter::{StructuredAnalysis, parse_analysis};

/// Builds the `/analyses` route group.
pub fn analyses_routes() -> Router<AppState> {
    Router::new().route("/", post(parse_response))
}

/// POST /api/analyses
///
/// Parse a raw AI response and return the extracted fields, without building a document.
///
/// ### Request
/// The raw AI response as a UTF-8 `text/plain` body.
///
/// ### Responses
///
/// - `200 OK`
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "student_name": "Maria Silva",
///     "topic": "",
///     "date": "",
///     "transcription": "...",
///     "general_comments": "...",
///     "estimated_score": "880",
///     "originality_alert": "",
///     "criteria": [
///       { "id": 1, "score_text": "160", "analysis_text": "...", "flagged_excerpts": ["..."] }
///     ]
///   },
///   "message": "Analysis parsed"
/// }
/// ```
///
/// - `400 Bad Request`: Empty body.
pub async fn parse_response(body: String) -> Response {
    if body.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Request body is empty");
    }
    let analysis: StructuredAnalysis = parse_analysis(&body);
    tracing::debug!(criteria = analysis.criteria.len(), "parsed analysis");
    (
        StatusCode::OK,
        Json(ApiResponse::success(analysis, "Analysis parsed")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn json(response: Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn returns_parsed_fields() {
        let raw = "### Nome do Aluno\nMaria Silva\n### Nota Estimada\n880".to_string();
        let response = parse_response(raw).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["student_name"], "Maria Silva");
        assert_eq!(json["data"]["estimated_score"], "880");
        assert_eq!(json["data"]["criteria"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn blank_body_is_rejected() {
        let response = parse_response("  \n".into()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["success"], false);
    }
}
