mod routes;

pub use routes::{SuggestionsRequest, routes};
