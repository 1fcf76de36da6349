// src/server/routes.rs
// =============================================================================
// HTTP handlers.
//
// - GET  /ping            -> "pong"
// - POST /api/v1/search   -> SearchResult as JSON, always with HTTP 200
//
// The search body is taken as raw bytes rather than through axum's Json
// extractor, so a missing Content-Type header or one badly typed field does
// not throw away the fields that are there.
// =============================================================================

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::search::{SearchRequest, SearchResult};

pub(super) async fn ping() -> &'static str {
    "pong"
}

pub(super) async fn search(State(state): State<AppState>, body: Bytes) -> Json<SearchResult> {
    let request = SearchRequest::from_json_body(&body);
    Json(state.aggregator.search(request).await)
}
