pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod quality;
pub mod router;
pub mod state;
pub mod topic;
pub mod tracing;

pub use config::{ApiConfig, Environment};
pub use error::ApiError;
pub use state::ApiState;
