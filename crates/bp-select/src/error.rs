use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a topic pool
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("failed to read topic pool {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid topic pool JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("topic id '{0}' appears more than once")]
    DuplicateTopic(String),
    #[error("category '{category}' has an empty topic id")]
    EmptyTopicId { category: String },
    #[error("category '{category}' has invalid weight {weight}; weights must be positive")]
    InvalidWeight { category: String, weight: f64 },
    #[error("unknown difficulty '{0}' (expected beginner, intermediate or advanced)")]
    UnknownDifficulty(String),
}

#[derive(Error, Debug)]
pub enum SelectError {
    #[error("topic pool is empty")]
    EmptyPool,
    #[error("selected topic '{0}' is missing from the pool")]
    UnknownTopic(String),
}
