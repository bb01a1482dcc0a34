//! Topic selection service.
//!
//! Picking is split in two steps. [`select_candidate`] is a pure function over
//! an immutable snapshot of candidates and an injected RNG. Recording the pick
//! is a separate, side-effecting step on [`TopicSelector`], which owns the pool
//! and the usage store.

use std::collections::HashSet;

use bp_store::UsageStore;
use chrono::{DateTime, TimeDelta, Utc};
use rand::{
    Rng, SeedableRng,
    distributions::{Distribution, WeightedIndex},
    rngs::StdRng,
    seq::SliceRandom,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    error::SelectError,
    pool::{Candidate, Difficulty, TopicPool},
    score::calculate_topic_score,
    stats::{CategoryStats, category_stats},
};

/// Filters and switches for a single pick.
///
/// `None` filters mean "any". When deserialized, the literal string `"any"` is
/// accepted for both filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionOptions {
    #[serde(deserialize_with = "deserialize_difficulty_filter")]
    pub difficulty: Option<Difficulty>,
    #[serde(deserialize_with = "deserialize_category_filter")]
    pub category: Option<String>,
    /// Skip topics used within the recent window
    pub avoid_recent: bool,
    /// Draw a category by weight before ranking topics
    pub balance_categories: bool,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            difficulty: None,
            category: None,
            avoid_recent: true,
            balance_categories: true,
        }
    }
}

fn deserialize_difficulty_filter<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("any") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn deserialize_category_filter<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("any")))
}

/// Tunables for the selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Topics used within this many days count as recent
    pub recent_window_days: i64,
    /// Size of the top-ranked group the final pick is drawn from
    pub top_candidates: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            recent_window_days: 7,
            top_candidates: 5,
        }
    }
}

/// Pick one candidate from a snapshot.
///
/// Returns `None` only when `candidates` is empty.
///
/// # Steps
///
/// 1. Filter by difficulty and category, then drop recently used topics when
///    `avoid_recent` is set. Never-used topics always pass.
/// 2. If nothing survives, fall back to the full, unfiltered list.
/// 3. If `balance_categories` is set, draw one category by weight among the
///    categories still present and keep only its topics.
/// 4. Rank by [`calculate_topic_score`] and pick uniformly among the top
///    `config.top_candidates`.
pub fn select_candidate<'a, R>(
    candidates: &'a [Candidate],
    options: &SelectionOptions,
    config: &SelectorConfig,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Option<&'a Candidate>
where
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }

    let recent_cutoff = recent_cutoff(now, config.recent_window_days);

    let mut filtered: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| options.difficulty.is_none_or(|d| c.topic.difficulty == d))
        .filter(|c| {
            options
                .category
                .as_deref()
                .is_none_or(|key| c.category_key == key)
        })
        .filter(|c| {
            !options.avoid_recent || c.topic.last_used.is_none_or(|t| t <= recent_cutoff)
        })
        .collect();

    if filtered.is_empty() {
        tracing::debug!(?options, "No topic matched the filters, using the full pool");
        filtered = candidates.iter().collect();
    }

    if options.balance_categories {
        filtered = balance_by_category(filtered, rng);
    }

    let mut ranked: Vec<(&Candidate, f64)> = filtered
        .into_iter()
        .map(|c| (c, calculate_topic_score(c, now)))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(config.top_candidates.max(1));

    ranked.choose(rng).map(|(c, score)| {
        tracing::debug!(topic_id = %c.topic.id, score, "Topic drawn from top candidates");
        *c
    })
}

/// Topics used after this instant count as recent.
///
/// A window too large for the calendar saturates: a huge positive window makes
/// every used topic recent, a huge negative one makes none recent.
fn recent_cutoff(now: DateTime<Utc>, window_days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(window_days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(if window_days >= 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// Draw one category by weight and keep only its candidates.
fn balance_by_category<'a, R>(candidates: Vec<&'a Candidate>, rng: &mut R) -> Vec<&'a Candidate>
where
    R: Rng + ?Sized,
{
    let mut categories: Vec<(&str, f64)> = Vec::new();
    for c in &candidates {
        if !categories.iter().any(|(key, _)| *key == c.category_key) {
            categories.push((c.category_key.as_str(), c.category_weight));
        }
    }

    if categories.len() < 2 {
        return candidates;
    }

    let chosen = match WeightedIndex::new(categories.iter().map(|(_, weight)| *weight)) {
        Ok(dist) => categories[dist.sample(rng)].0,
        Err(e) => {
            tracing::warn!("Category weights unusable, skipping balance: {e}");
            return candidates;
        }
    };

    candidates
        .iter()
        .copied()
        .filter(|c| c.category_key == chosen)
        .collect()
}

/// Picks topics from a pool and records their usage.
pub struct TopicSelector {
    pool: TopicPool,
    store: Box<dyn UsageStore>,
    config: SelectorConfig,
    rng: StdRng,
}

impl TopicSelector {
    /// Create a selector and merge the stored usage history into `pool`.
    ///
    /// A history that cannot be read is logged and ignored: usage only biases
    /// selection toward freshness, so the pool's inline usage is good enough.
    pub fn new(mut pool: TopicPool, store: impl UsageStore + 'static) -> Self {
        match store.load_all() {
            Ok(history) => pool.apply_usage(&history),
            Err(e) => tracing::warn!("Failed to load topic usage history: {e}"),
        }

        Self {
            pool,
            store: Box::new(store),
            config: SelectorConfig::default(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_config(mut self, config: SelectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the RNG, e.g. with a seeded one for reproducible picks
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn pool(&self) -> &TopicPool {
        &self.pool
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Every topic with its current usage
    pub fn topics(&self) -> Vec<Candidate> {
        self.pool.candidates()
    }

    /// Pick a topic and record its use.
    ///
    /// Returns the chosen topic with its usage already updated. Fails only
    /// when the pool holds no topic at all.
    pub fn get_smart_topic(&mut self, options: &SelectionOptions) -> Result<Candidate, SelectError> {
        let now = Utc::now();
        let candidates = self.pool.candidates();

        let chosen_id = select_candidate(&candidates, options, &self.config, now, &mut self.rng)
            .map(|c| c.topic.id.clone())
            .ok_or(SelectError::EmptyPool)?;

        let chosen = self
            .record_use(&chosen_id, now)
            .ok_or(SelectError::UnknownTopic(chosen_id))?;

        tracing::info!(
            topic_id = %chosen.topic.id,
            category = %chosen.category_key,
            use_count = chosen.topic.use_count,
            "Selected topic"
        );
        Ok(chosen)
    }

    /// Record one use of a topic and persist the usage history.
    ///
    /// Unknown ids are ignored and yield `None`.
    pub fn mark_topic_as_used(&mut self, topic_id: &str) -> Option<Candidate> {
        let updated = self.record_use(topic_id, Utc::now());
        if updated.is_none() {
            tracing::debug!(topic_id, "Ignoring usage for unknown topic");
        }
        updated
    }

    fn record_use(&mut self, topic_id: &str, now: DateTime<Utc>) -> Option<Candidate> {
        let updated = self.pool.record_use(topic_id, now)?;

        // The whole pool is saved so inline usage reaches the history too
        if let Err(e) = self.store.save_all(&self.pool.usage_history()) {
            tracing::warn!(topic_id, "Failed to persist topic usage: {e}");
        }

        Some(updated)
    }

    /// Pick up to `count` distinct topics, spreading them across categories.
    ///
    /// Each draw targets a category that has not been drawn yet, then falls
    /// back to any category once all were used. Recently used topics are not
    /// excluded. Topics already suggested are out of the running, so a small
    /// pool yields fewer than `count` suggestions. Only returned suggestions
    /// have their use recorded.
    pub fn get_topic_suggestions(&mut self, count: usize) -> Result<Vec<Candidate>, SelectError> {
        if count > 0 && self.pool.is_empty() {
            return Err(SelectError::EmptyPool);
        }

        let now = Utc::now();
        let mut remaining: Vec<String> = self
            .pool
            .categories()
            .iter()
            .filter(|c| !c.topics.is_empty())
            .map(|c| c.key.clone())
            .collect();
        let mut seen = HashSet::new();
        let mut suggestions = Vec::with_capacity(count);

        while suggestions.len() < count {
            let unseen: Vec<Candidate> = self
                .pool
                .candidates()
                .into_iter()
                .filter(|c| !seen.contains(&c.topic.id))
                .collect();

            let category = if remaining.is_empty() {
                None
            } else {
                let idx = self.rng.gen_range(0..remaining.len());
                Some(remaining.swap_remove(idx))
            };
            let options = SelectionOptions {
                category,
                avoid_recent: false,
                ..SelectionOptions::default()
            };

            let Some(chosen_id) =
                select_candidate(&unseen, &options, &self.config, now, &mut self.rng)
                    .map(|c| c.topic.id.clone())
            else {
                break;
            };

            let chosen = self
                .record_use(&chosen_id, now)
                .ok_or(SelectError::UnknownTopic(chosen_id))?;
            seen.insert(chosen.topic.id.clone());
            suggestions.push(chosen);
        }

        tracing::info!(
            requested = count,
            returned = suggestions.len(),
            "Suggested topics"
        );
        Ok(suggestions)
    }

    pub fn get_category_stats(&self) -> Vec<CategoryStats> {
        category_stats(&self.pool)
    }
}
