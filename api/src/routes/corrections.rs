use crate::routes::common::{ai_error_status, build_report, error_response};
use crate::state::AppState;
use ai::preprocess::{MIME_JPEG, MIME_PNG};
use ai::{mime_for_path, preprocess_image, sniff_mime};
use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::Response,
    routing::post,
};

/// Phone photos of a full page are routinely several megabytes.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;
pub const IMAGE_FIELD: &str = "image";
const ALLOWED_MIME: &[&str] = &[MIME_JPEG, MIME_PNG];

/// Builds the `/corrections` route group.
pub fn corrections_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_correction))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

struct Upload {
    bytes: Bytes,
    declared_mime: Option<String>,
    file_name: Option<String>,
}

/// POST /api/corrections
///
/// Analyse a photo of a handwritten essay and download the correction report.
///
/// ### Request (multipart/form-data)
/// - `image` (required): The essay photo, JPEG or PNG.
///
/// ### Responses
///
/// - `200 OK`: The `.docx` report as an attachment. The `X-Report-Status` header is `complete`, or
///   `fallback` when the formatted layout failed and the plain document with the raw analysis was
///   sent instead.
/// - `400 Bad Request`: No `image` field, or it is empty.
/// - `415 Unsupported Media Type`: The upload is not a JPEG or PNG.
/// - `502 Bad Gateway`: The AI service failed or returned no text.
/// - `500 Internal Server Error`: The AI client is misconfigured or the report could not be built.
///
/// ```json
/// {
///   "success": false,
///   "data": null,
///   "message": "Essay analysis failed: AI response contained no text"
/// }
/// ```
pub async fn create_correction(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let upload = match read_image(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("No image uploaded. Send the essay photo in the '{IMAGE_FIELD}' field."),
            );
        }
        Err(e) => return error_response(e.status(), e.body_text()),
    };

    if upload.bytes.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Uploaded image is empty");
    }

    let Some(mime) = resolve_mime(&upload) else {
        return error_response(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported image type. Use JPEG or PNG.",
        );
    };

    let (image, mime) = if state.config().preprocess_images {
        let original = upload.bytes.clone();
        match tokio::task::spawn_blocking(move || preprocess_image(&original)).await {
            Ok(processed) => {
                let processed_mime = sniff_mime(&processed).unwrap_or(mime);
                (processed, processed_mime)
            }
            Err(e) => {
                tracing::warn!(error = %e, "pre-processing task failed, using original image");
                (upload.bytes.to_vec(), mime)
            }
        }
    } else {
        (upload.bytes.to_vec(), mime)
    };

    let analyzer = state.analyzer();
    tracing::info!(analyzer = analyzer.name(), bytes = image.len(), mime, "analysing essay");
    let raw = match analyzer.analyze(&image, mime).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!(error = %e, "essay analysis failed");
            return error_response(ai_error_status(&e), format!("Essay analysis failed: {e}"));
        }
    };

    build_report(state.builder_clone(), raw).await
}

async fn read_image(multipart: &mut Multipart) -> Result<Option<Upload>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let declared_mime = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;
        return Ok(Some(Upload {
            bytes,
            declared_mime,
            file_name,
        }));
    }
    Ok(None)
}

/// The image signature wins; the declared content type and then the file extension are used when
/// the signature is not recognised.
fn resolve_mime(upload: &Upload) -> Option<&'static str> {
    sniff_mime(&upload.bytes)
        .or_else(|| {
            let declared = upload.declared_mime.as_deref()?;
            ALLOWED_MIME.iter().copied().find(|m| *m == declared)
        })
        .or_else(|| upload.file_name.as_deref().and_then(mime_for_path))
}
