//! Per-category usage summaries over a topic pool.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pool::TopicPool;

/// Usage summary for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub key: String,
    pub name: String,
    pub topic_count: usize,
    /// Sum of `useCount` over the category's topics
    pub total_uses: u64,
    /// Most recent use of any topic in the category
    pub last_used: Option<DateTime<Utc>>,
    pub weight: f64,
}

/// Aggregate usage per category, in pool order.
pub fn category_stats(pool: &TopicPool) -> Vec<CategoryStats> {
    pool.categories()
        .iter()
        .map(|category| CategoryStats {
            key: category.key.clone(),
            name: category.name.clone(),
            topic_count: category.topics.len(),
            total_uses: category.topics.iter().map(|t| u64::from(t.use_count)).sum(),
            last_used: category.topics.iter().filter_map(|t| t.last_used).max(),
            weight: category.weight,
        })
        .collect()
}
