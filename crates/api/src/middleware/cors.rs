//! CORS handling for the submission endpoint.
//!
//! `tower_http::cors::CorsLayer` omits `Access-Control-Allow-Origin` for
//! origins it does not allow. This endpoint instead always answers with the
//! configured origin, so a browser on any other site sees a mismatch and
//! blocks the response itself.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, ORIGIN,
};
use axum::http::{HeaderMap, HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";
/// Preflight cache lifetime: one day.
pub const MAX_AGE_SECS: &str = "86400";

/// Origins served from the developer's own machine, on any port.
const LOOPBACK_PREFIXES: [&str; 2] = ["http://localhost:", "http://127.0.0.1:"];

/// Pick the `Access-Control-Allow-Origin` value for a request.
///
/// The request origin is echoed when it is the configured origin or a
/// loopback origin; otherwise the configured origin is returned.
pub fn allow_origin<'a>(origin: Option<&'a str>, allowed_origin: &'a str) -> &'a str {
    match origin {
        Some(origin)
            if origin == allowed_origin
                || LOOPBACK_PREFIXES.iter().any(|p| origin.starts_with(p)) =>
        {
            origin
        }
        _ => allowed_origin,
    }
}

/// Insert the CORS headers into `headers`.
pub fn apply_cors_headers(headers: &mut HeaderMap, origin: &str) {
    if let Ok(value) = HeaderValue::from_str(origin) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
}

/// Answer preflights directly and decorate every other response.
pub async fn cors_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let allowed = allow_origin(origin.as_deref(), &state.config.allowed_origin).to_string();

    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::OK.into_response();
        apply_cors_headers(response.headers_mut(), &allowed);
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut(), &allowed);
    response
}
