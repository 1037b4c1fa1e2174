use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the route tree.
///
/// ```text
/// POST /api/submit          file a proposal
/// OPTIONS *                 CORS preflight (answered by middleware)
/// *                         404 {"error":"Not found"}
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/api/submit",
        post(handlers::submit::submit_proposal).fallback(handlers::fallback::not_found),
    )
}
