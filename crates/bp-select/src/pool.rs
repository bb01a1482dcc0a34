//! Topic catalog model and loader.
//!
//! The catalog is authored by hand as JSON:
//!
//! ```json
//! {
//!   "categories": {
//!     "ai": {
//!       "name": "Artificial Intelligence",
//!       "weight": 0.3,
//!       "topics": [
//!         { "id": "ai-ethics", "title": "AI Ethics", "difficulty": "beginner", "estimatedReadTime": 6 }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! Usage fields (`lastUsed`, `useCount`) may appear inline but are normally
//! merged in from the usage history with [`TopicPool::apply_usage`].

use std::{
    collections::{BTreeMap, HashSet},
    fmt, fs,
    path::Path,
    str::FromStr,
};

use bp_store::{UsageHistory, UsageRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PoolError;

/// How demanding a topic is for the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(PoolError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// A candidate subject for an article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Stable identifier, unique across the whole pool
    pub id: String,
    /// Human-readable topic string handed to the writer
    pub title: String,
    pub difficulty: Difficulty,
    /// Expected reading time in minutes
    pub estimated_read_time: u32,
    /// Optional keyword hints for the drafting prompt
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// When the topic was last picked, `None` if never
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
    /// How many times the topic has been picked
    #[serde(default)]
    pub use_count: u32,
}

impl Topic {
    /// Current usage of this topic as a persistable record
    pub fn usage(&self) -> UsageRecord {
        UsageRecord {
            last_used: self.last_used,
            use_count: self.use_count,
        }
    }

    fn set_usage(&mut self, record: UsageRecord) {
        self.last_used = record.last_used;
        self.use_count = record.use_count;
    }
}

/// A named, weighted group of topics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub key: String,
    pub name: String,
    /// Relative weight for balancing draws across categories
    pub weight: f64,
    pub topics: Vec<Topic>,
}

/// A topic annotated with its category, as handed out by the selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(flatten)]
    pub topic: Topic,
    pub category_key: String,
    pub category_name: String,
    pub category_weight: f64,
}

impl Candidate {
    fn new(category: &Category, topic: &Topic) -> Self {
        Self {
            topic: topic.clone(),
            category_key: category.key.clone(),
            category_name: category.name.clone(),
            category_weight: category.weight,
        }
    }
}

#[derive(Deserialize)]
struct PoolFile {
    categories: BTreeMap<String, CategoryFile>,
}

#[derive(Deserialize)]
struct CategoryFile {
    name: String,
    weight: f64,
    #[serde(default)]
    topics: Vec<Topic>,
}

/// The static topic catalog plus the usage merged into it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopicPool {
    categories: Vec<Category>,
}

impl TopicPool {
    /// Build a pool, validating weights and topic id uniqueness.
    pub fn new(categories: Vec<Category>) -> Result<Self, PoolError> {
        let mut seen = HashSet::new();

        for category in &categories {
            if !category.weight.is_finite() || category.weight <= 0.0 {
                return Err(PoolError::InvalidWeight {
                    category: category.key.clone(),
                    weight: category.weight,
                });
            }

            for topic in &category.topics {
                if topic.id.trim().is_empty() {
                    return Err(PoolError::EmptyTopicId {
                        category: category.key.clone(),
                    });
                }
                if !seen.insert(topic.id.as_str()) {
                    return Err(PoolError::DuplicateTopic(topic.id.clone()));
                }
            }
        }

        Ok(Self { categories })
    }

    /// Parse a pool from its JSON representation. Categories end up ordered by key.
    pub fn from_json(json: &str) -> Result<Self, PoolError> {
        let file: PoolFile = serde_json::from_str(json)?;

        let categories = file
            .categories
            .into_iter()
            .map(|(key, category)| Category {
                key,
                name: category.name,
                weight: category.weight,
                topics: category.topics,
            })
            .collect();

        Self::new(categories)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PoolError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| PoolError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn topic_count(&self) -> usize {
        self.categories.iter().map(|c| c.topics.len()).sum()
    }

    /// True when there is no topic to pick, even if categories exist
    pub fn is_empty(&self) -> bool {
        self.topic_count() == 0
    }

    /// Flatten the pool into topics annotated with their category.
    pub fn candidates(&self) -> Vec<Candidate> {
        self.categories
            .iter()
            .flat_map(|category| {
                category
                    .topics
                    .iter()
                    .map(move |topic| Candidate::new(category, topic))
            })
            .collect()
    }

    /// Find a topic by id across all categories.
    pub fn find(&self, topic_id: &str) -> Option<Candidate> {
        self.categories.iter().find_map(|category| {
            category
                .topics
                .iter()
                .find(|t| t.id == topic_id)
                .map(|topic| Candidate::new(category, topic))
        })
    }

    /// Overwrite inline usage with the persisted history.
    ///
    /// Entries for ids that are not in the pool are ignored.
    pub fn apply_usage(&mut self, history: &UsageHistory) {
        for topic in self.categories.iter_mut().flat_map(|c| c.topics.iter_mut()) {
            if let Some(record) = history.get(&topic.id) {
                topic.set_usage(*record);
            }
        }
    }

    /// Usage of every topic in the pool, keyed by id
    pub fn usage_history(&self) -> UsageHistory {
        self.categories
            .iter()
            .flat_map(|c| c.topics.iter())
            .map(|t| (t.id.clone(), t.usage()))
            .collect()
    }

    /// Record one use of `topic_id` at `now`.
    ///
    /// Returns the updated topic, or `None` when no topic has that id.
    pub fn record_use(&mut self, topic_id: &str, now: DateTime<Utc>) -> Option<Candidate> {
        for category in &mut self.categories {
            if let Some(topic) = category.topics.iter_mut().find(|t| t.id == topic_id) {
                let mut usage = topic.usage();
                usage.record_use(now);
                topic.set_usage(usage);

                return Some(Candidate {
                    topic: topic.clone(),
                    category_key: category.key.clone(),
                    category_name: category.name.clone(),
                    category_weight: category.weight,
                });
            }
        }
        None
    }
}
