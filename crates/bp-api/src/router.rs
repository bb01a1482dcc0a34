use axum::{
    Json, Router, http::StatusCode, middleware, response::IntoResponse, routing::get,
};
use serde_json::json;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{
    metrics::track_metrics,
    middleware::{create_cors_layer, request_id_middleware},
    quality,
    state::ApiState,
    topic,
};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .merge(topic::routes())
        .merge(quality::routes())
        .fallback(handler_404)
}

/// Wrap a finished app in CORS, HTTP tracing, request metrics and request ids.
///
/// The request id layer is outermost so every log line of a request carries it.
pub fn with_middleware(app: Router, allowed_origins: &[String]) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    app.layer(create_cors_layer(allowed_origins))
        .layer(trace_layer)
        .layer(middleware::from_fn(track_metrics))
        .layer(middleware::from_fn(request_id_middleware))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "The requested resource was not found" })),
    )
}
