use std::path::PathBuf;

use bp_quality::ScorerConfig;
use bp_select::SelectorConfig;
use serde::Deserialize;

/// Prefix shared by every configuration variable
pub const ENV_PREFIX: &str = "BLOGPIPE_";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Service configuration, read from `BLOGPIPE_*` environment variables
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub env: Environment,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_topic_pool_path")]
    pub topic_pool_path: PathBuf,
    #[serde(default = "default_usage_history_path")]
    pub usage_history_path: PathBuf,
    #[serde(default = "default_recent_window_days")]
    pub recent_window_days: i64,
    #[serde(default = "default_top_candidates")]
    pub top_candidates: usize,
    #[serde(default = "default_internal_link_prefix")]
    pub internal_link_prefix: String,
    /// Drafts scoring below this are logged as warnings
    #[serde(default = "default_min_quality_score")]
    pub min_quality_score: u32,
    /// Comma separated list of origins allowed by CORS
    #[serde(default)]
    pub allowed_origins: Option<String>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_topic_pool_path() -> PathBuf {
    PathBuf::from("data/topics.json")
}

fn default_usage_history_path() -> PathBuf {
    PathBuf::from("data/topic-usage.json")
}

fn default_recent_window_days() -> i64 {
    SelectorConfig::default().recent_window_days
}

fn default_top_candidates() -> usize {
    SelectorConfig::default().top_candidates
}

fn default_internal_link_prefix() -> String {
    ScorerConfig::default().internal_link_prefix
}

fn default_min_quality_score() -> u32 {
    70
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env()
    }

    pub fn selector_config(&self) -> SelectorConfig {
        SelectorConfig {
            recent_window_days: self.recent_window_days,
            top_candidates: self.top_candidates,
        }
    }

    pub fn scorer_config(&self) -> ScorerConfig {
        ScorerConfig {
            internal_link_prefix: self.internal_link_prefix.clone(),
        }
    }

    /// Allowed CORS origins, empty when unset
    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}
