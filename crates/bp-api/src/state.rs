use std::sync::Arc;

use anyhow::Context;
use bp_quality::QualityScorer;
use bp_select::{TopicPool, TopicSelector};
use bp_store::JsonFileStore;
use tokio::sync::Mutex;

use crate::ApiConfig;

#[derive(Clone)]
pub struct ApiState {
    /// Selection mutates usage, so every request goes through one lock
    pub selector: Arc<Mutex<TopicSelector>>,
    pub scorer: Arc<QualityScorer>,
    pub min_quality_score: u32,
}

impl ApiState {
    /// Load the topic pool and usage history named in `config`.
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let pool = TopicPool::from_path(&config.topic_pool_path).with_context(|| {
            format!(
                "Failed to load topic pool from {}",
                config.topic_pool_path.display()
            )
        })?;
        if pool.is_empty() {
            tracing::warn!(
                path = %config.topic_pool_path.display(),
                "Topic pool has no topics, selection requests will fail"
            );
        }

        let store = JsonFileStore::new(&config.usage_history_path);
        let selector = TopicSelector::new(pool, store).with_config(config.selector_config());

        tracing::info!(
            topics = selector.pool().topic_count(),
            categories = selector.pool().categories().len(),
            history = %config.usage_history_path.display(),
            "Topic pool loaded"
        );

        Ok(Self::from_parts(
            selector,
            QualityScorer::new(config.scorer_config()),
            config.min_quality_score,
        ))
    }

    pub fn from_parts(
        selector: TopicSelector,
        scorer: QualityScorer,
        min_quality_score: u32,
    ) -> Self {
        Self {
            selector: Arc::new(Mutex::new(selector)),
            scorer: Arc::new(scorer),
            min_quality_score,
        }
    }
}
