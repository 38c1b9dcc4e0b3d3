//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Liveness check
//! - `/corrections` → Essay photo in, correction report out
//! - `/reports` → Raw AI response in, correction report out
//! - `/analyses` → Raw AI response in, parsed fields out as JSON

use crate::routes::{
    analyses::analyses_routes, corrections::corrections_routes, health::health_routes,
    reports::reports_routes,
};
use crate::state::AppState;
use axum::Router;

pub mod analyses;
pub mod common;
pub mod corrections;
pub mod health;
pub mod reports;

/// Builds the application router for all `/api` endpoints.
///
/// # Arguments
/// * `app_state` - Shared configuration, AI analyzer and report builder.
///
/// # Returns
/// A `Router` with its state applied, ready to be nested under `/api`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/corrections", corrections_routes())
        .nest("/reports", reports_routes())
        .nest("/analyses", analyses_routes())
        .with_state(app_state)
}
