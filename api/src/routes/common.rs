//! Helpers shared by the report routes.

use crate::response::ApiResponse;
use ai::AiError;
use axum::{
    Json,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reporter::docx::DOCX_MIME;
use reporter::{Report, ReportBuilder};
use std::sync::Arc;

/// Response header telling whether the configured layout was used (`complete`) or the plain
/// fallback document was sent (`fallback`).
pub const REPORT_STATUS_HEADER: HeaderName = HeaderName::from_static("x-report-status");

/// JSON error envelope with `status`.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

/// `200 OK` with the `.docx` as an attachment.
pub fn report_response(report: Report) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(DOCX_MIME));
    headers.insert(header::CONTENT_DISPOSITION, content_disposition(&report.file_name));
    headers.insert(
        REPORT_STATUS_HEADER,
        HeaderValue::from_static(report.status.as_str()),
    );
    if let Some(error) = report.status.error() {
        tracing::warn!(file = %report.file_name, error = %error, "sending fallback report");
    }
    (StatusCode::OK, headers, report.bytes).into_response()
}

/// Parse `raw` and build its report off the async runtime, then answer the `.docx`.
///
/// The builder always yields a document (falling back to the plain layout), so only a failure to
/// package even that fallback, or a panicked build task, is an error here.
pub async fn build_report(builder: Arc<ReportBuilder>, raw: String) -> Response {
    match tokio::task::spawn_blocking(move || builder.build_from_text(&raw)).await {
        Ok(Ok(report)) => report_response(report),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "could not package report");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to build report: {e}"),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "report task panicked");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to build report")
        }
    }
}

/// `attachment` disposition with an ASCII `filename` and the exact UTF-8 name in `filename*`.
fn content_disposition(file_name: &str) -> HeaderValue {
    let ascii: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    let encoded = utf8_percent_encode(file_name, NON_ALPHANUMERIC);
    HeaderValue::from_str(&format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}"
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// Configuration problems are ours (`500`); everything the remote service did is `502`.
pub fn ai_error_status(error: &AiError) -> StatusCode {
    match error {
        AiError::MissingApiKey | AiError::PromptNotFound(_) | AiError::Io(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AiError::Http(_)
        | AiError::Api { .. }
        | AiError::InvalidResponse(_)
        | AiError::EmptyResponse => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disposition_keeps_utf8_name_in_extended_parameter() {
        let value = content_disposition("correcao_João_Souza.docx");
        let value = value.to_str().unwrap();
        assert!(value.starts_with("attachment; filename=\"correcao_Jo_o_Souza.docx\""));
        assert!(value.contains("filename*=UTF-8''correcao%5FJo%C3%A3o%5FSouza%2Edocx"));
    }

    #[test]
    fn ai_errors_map_to_gateway_or_server_errors() {
        assert_eq!(ai_error_status(&AiError::EmptyResponse), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ai_error_status(&AiError::Api { status: 503, body: String::new() }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ai_error_status(&AiError::MissingApiKey),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
