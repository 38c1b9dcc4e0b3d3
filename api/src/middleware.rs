use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts},
    http::{Method, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::TypedHeader;
use headers::UserAgent;
use std::net::SocketAddr;
use std::time::Instant;

/// Logs every request with its outcome.
///
/// ### Fields Logged:
/// - `method`, `path`
/// - `ip`: Remote address when the server was started with connect info, `unknown` otherwise
/// - `user_agent`
/// - `status`, `elapsed_ms`
pub async fn log_request(req: Request<Body>, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    if parts.method == Method::OPTIONS {
        return next.run(Request::from_parts(parts, body)).await;
    }

    let ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".into());

    let user_agent = TypedHeader::<UserAgent>::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|TypedHeader(ua)| ua.to_string())
        .unwrap_or_else(|| "unknown".into());

    let method = parts.method.clone();
    let path = parts.uri.path().to_string();
    let started = Instant::now();

    let response = next.run(Request::from_parts(parts, body)).await;

    tracing::info!(
        method = ?method,
        path = %path,
        ip = %ip,
        user_agent = %user_agent,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Handled request"
    );
    response
}
