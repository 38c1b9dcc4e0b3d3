//! # API Library
//!
//! HTTP surface of the essay correction service: an essay photo goes in, the `.docx` correction
//! report comes out.
//!
//! [`app`] assembles the full router so the binary and the integration tests serve exactly the same
//! stack.

pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

use axum::{
    Router,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    middleware::from_fn,
};
use routes::common::REPORT_STATUS_HEADER;
use tower_http::cors::CorsLayer;

/// The complete application: `/api` routes, request logging and CORS.
///
/// The download headers are exposed so browser clients can read the file name and the report
/// status.
pub fn app(state: state::AppState) -> Router {
    let cors = CorsLayer::very_permissive().expose_headers([
        CONTENT_DISPOSITION,
        CONTENT_TYPE,
        REPORT_STATUS_HEADER,
    ]);

    Router::new()
        .nest("/api", routes::routes(state))
        .layer(from_fn(middleware::log_request))
        .layer(cors)
}
