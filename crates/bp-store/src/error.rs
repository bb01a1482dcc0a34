use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("usage history I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("usage history is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
