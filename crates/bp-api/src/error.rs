use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bp_select::SelectError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Topic not found: {0}")]
    TopicNotFound(String),
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::TopicNotFound(_) => StatusCode::NOT_FOUND,
            Self::Select(SelectError::EmptyPool) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Select(SelectError::UnknownTopic(_)) | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {self}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
