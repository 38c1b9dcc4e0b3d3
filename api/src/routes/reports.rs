use crate::routes::common::{build_report, error_response};
use crate::state::AppState;
use axum::{Router, extract::State, http::StatusCode, response::Response, routing::post};

/// Builds the `/reports` route group.
pub fn reports_routes() -> Router<AppState> {
    Router::new().route("/", post(create_report))
}

/// POST /api/reports
///
/// Build the correction report for an AI response that is already at hand, skipping the image
/// analysis. Useful for re-rendering a stored response with a different template.
///
/// ### Request
/// The raw AI response as a UTF-8 `text/plain` body.
///
/// ### Responses
///
/// - `200 OK`: The `.docx` report as an attachment, with `X-Report-Status`.
/// - `400 Bad Request`: Empty body.
/// - `500 Internal Server Error`: Not even the fallback document could be packaged.
pub async fn create_report(State(state): State<AppState>, body: String) -> Response {
    if body.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Request body is empty");
    }
    build_report(state.builder_clone(), body).await
}
