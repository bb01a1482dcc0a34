mod routes;

pub use routes::{QualityRequest, routes};
