use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use bp_select::{Candidate, CategoryStats, SelectionOptions, TopicSelector};
use serde::Deserialize;
use validator::Validate;

use crate::{error::ApiError, metrics::record_topic_selected, state::ApiState};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/topics", get(list_topics))
        .route("/topics/select", post(select_topic))
        .route("/topics/suggestions", post(suggest_topics))
        .route("/topics/stats", get(category_stats))
        .route("/topics/{id}/use", post(mark_used))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SuggestionsRequest {
    #[validate(range(min = 1, max = 20, message = "count must be between 1 and 20"))]
    #[serde(default = "default_suggestion_count")]
    pub count: usize,
}

fn default_suggestion_count() -> usize {
    3
}

/// Run a selector operation that persists usage on the blocking pool.
///
/// Saving the history does synchronous file I/O, so it must not run on an
/// async worker. The selector lock is held for the whole operation.
async fn with_selector<T, F>(state: &ApiState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut TopicSelector) -> T + Send + 'static,
    T: Send + 'static,
{
    let selector = Arc::clone(&state.selector);
    let result = tokio::task::spawn_blocking(move || op(&mut selector.blocking_lock())).await?;
    Ok(result)
}

async fn list_topics(State(state): State<ApiState>) -> Json<Vec<Candidate>> {
    Json(state.selector.lock().await.topics())
}

async fn select_topic(
    State(state): State<ApiState>,
    Json(options): Json<SelectionOptions>,
) -> Result<Json<Candidate>, ApiError> {
    tracing::debug!(?options, "Selecting topic");

    let topic = with_selector(&state, move |selector| selector.get_smart_topic(&options)).await??;
    record_topic_selected(&topic.category_key);

    Ok(Json(topic))
}

async fn suggest_topics(
    State(state): State<ApiState>,
    Json(payload): Json<SuggestionsRequest>,
) -> Result<Json<Vec<Candidate>>, ApiError> {
    payload.validate()?;

    let count = payload.count;
    let suggestions =
        with_selector(&state, move |selector| selector.get_topic_suggestions(count)).await??;
    for topic in &suggestions {
        record_topic_selected(&topic.category_key);
    }

    Ok(Json(suggestions))
}

async fn category_stats(State(state): State<ApiState>) -> Json<Vec<CategoryStats>> {
    Json(state.selector.lock().await.get_category_stats())
}

async fn mark_used(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Candidate>, ApiError> {
    let topic_id = id.clone();
    with_selector(&state, move |selector| selector.mark_topic_as_used(&topic_id))
        .await?
        .map(Json)
        .ok_or(ApiError::TopicNotFound(id))
}
