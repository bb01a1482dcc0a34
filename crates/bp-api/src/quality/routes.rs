use axum::{Json, Router, extract::State, routing::post};
use bp_quality::{ArticleMetadata, QualityReport};
use serde::Deserialize;

use crate::{metrics::record_quality_score, state::ApiState};

pub fn routes() -> Router<ApiState> {
    Router::new().route("/quality", post(score_content))
}

#[derive(Debug, Deserialize)]
pub struct QualityRequest {
    pub content: String,
    #[serde(default)]
    pub metadata: ArticleMetadata,
}

/// Grade a Markdown draft. Low scores are reported, never rejected.
async fn score_content(
    State(state): State<ApiState>,
    Json(payload): Json<QualityRequest>,
) -> Json<QualityReport> {
    let report = state.scorer.validate(&payload.content, &payload.metadata);
    record_quality_score(report.overall_score);

    if report.overall_score < state.min_quality_score {
        tracing::warn!(
            overall = report.overall_score,
            seo = report.seo_score,
            readability = report.readability_score,
            human_like = report.human_like_score,
            issues = report.issues.len(),
            "Draft scored below the quality threshold"
        );
    } else {
        tracing::info!(overall = report.overall_score, "Draft scored");
    }

    Json(report)
}
