//! Topic selection for the blog content pipeline.
//!
//! This crate owns the static topic catalog ([`TopicPool`]), the pure ranking
//! function used to order candidates ([`calculate_topic_score`]) and the
//! [`TopicSelector`] service that picks a topic and records its usage through
//! a [`bp_store::UsageStore`].

pub mod error;
pub mod pool;
pub mod score;
pub mod selector;
pub mod stats;

pub use error::{PoolError, SelectError};
pub use pool::{Candidate, Category, Difficulty, Topic, TopicPool};
pub use score::calculate_topic_score;
pub use selector::{SelectionOptions, SelectorConfig, TopicSelector, select_candidate};
pub use stats::{CategoryStats, category_stats};
