//! Ranking heuristic for topic candidates.
//!
//! The score is a relative ranking signal only. It is not normalized and is not
//! a probability: the selector sorts by it and draws among the best few.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};

use crate::pool::{Candidate, Difficulty};

/// Starting score for every topic
pub const BASE_SCORE: f64 = 100.0;
/// Subtracted once per recorded use
pub const USE_PENALTY: f64 = 10.0;
/// Freshness gained per whole day since the last use
pub const FRESHNESS_PER_DAY: f64 = 2.0;
/// Freshness cap, also granted to topics that were never used
pub const MAX_FRESHNESS_BONUS: f64 = 50.0;
/// Multiplier applied to the category weight
pub const CATEGORY_WEIGHT_FACTOR: f64 = 100.0;
/// Reading times (minutes) that earn [`READ_TIME_BONUS`]
pub const IDEAL_READ_TIME: RangeInclusive<u32> = 5..=8;
pub const READ_TIME_BONUS: f64 = 10.0;

/// Score a candidate topic at a given instant.
///
/// # Arguments
///
/// * `candidate` - The topic with its category weight and current usage
/// * `now` - The instant used to measure days since the last use
///
/// # Algorithm
///
/// * Base: 100
/// * Usage penalty: `-10` per use
/// * Freshness: `min(days_since_last_use * 2, 50)`, or `+50` if never used
/// * Category weight: `weight * 100`
/// * Difficulty: beginner `+20`, intermediate `+15`, advanced `+5`
/// * Reading time of 5 to 8 minutes: `+10`
pub fn calculate_topic_score(candidate: &Candidate, now: DateTime<Utc>) -> f64 {
    let topic = &candidate.topic;

    let mut score = BASE_SCORE;
    score -= f64::from(topic.use_count) * USE_PENALTY;
    score += freshness_bonus(topic.last_used, now);
    score += candidate.category_weight * CATEGORY_WEIGHT_FACTOR;
    score += difficulty_bonus(topic.difficulty);

    if IDEAL_READ_TIME.contains(&topic.estimated_read_time) {
        score += READ_TIME_BONUS;
    }

    score
}

/// Bonus for topics that have rested a while
pub fn freshness_bonus(last_used: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match last_used {
        Some(last_used) => {
            let days = days_since(last_used, now) as f64;
            (days * FRESHNESS_PER_DAY).min(MAX_FRESHNESS_BONUS)
        }
        None => MAX_FRESHNESS_BONUS,
    }
}

pub const fn difficulty_bonus(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Beginner => 20.0,
        Difficulty::Intermediate => 15.0,
        Difficulty::Advanced => 5.0,
    }
}

/// Whole days elapsed since `then`. Timestamps in the future count as zero.
pub fn days_since(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Topic;
    use chrono::Duration;

    fn candidate(use_count: u32, last_used: Option<DateTime<Utc>>) -> Candidate {
        Candidate {
            topic: Topic {
                id: "t1".to_string(),
                title: "AI Ethics".to_string(),
                difficulty: Difficulty::Beginner,
                estimated_read_time: 6,
                keywords: Vec::new(),
                last_used,
                use_count,
            },
            category_key: "ai".to_string(),
            category_name: "AI".to_string(),
            category_weight: 1.0,
        }
    }

    #[test]
    fn test_never_used_topic() {
        let now = Utc::now();
        // 100 base + 50 fresh + 100 weight + 20 beginner + 10 read time
        assert_eq!(calculate_topic_score(&candidate(0, None), now), 280.0);
    }

    #[test]
    fn test_usage_penalty() {
        let now = Utc::now();
        let last_used = Some(now - Duration::days(10));

        let once = calculate_topic_score(&candidate(1, last_used), now);
        let thrice = calculate_topic_score(&candidate(3, last_used), now);
        assert_eq!(once - thrice, 20.0);
    }

    #[test]
    fn test_score_non_increasing_in_use_count() {
        let now = Utc::now();
        let last_used = Some(now - Duration::days(4));

        let scores: Vec<f64> = (0..20)
            .map(|uses| calculate_topic_score(&candidate(uses, last_used), now))
            .collect();
        assert!(scores.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_score_non_decreasing_in_days_and_capped() {
        let now = Utc::now();

        let scores: Vec<f64> = (0..60)
            .map(|days| calculate_topic_score(&candidate(1, Some(now - Duration::days(days))), now))
            .collect();
        assert!(scores.windows(2).all(|w| w[1] >= w[0]));

        // Cap reached at 25 days
        assert_eq!(scores[25], scores[59]);
        assert_eq!(scores[25] - scores[0], MAX_FRESHNESS_BONUS);
    }

    #[test]
    fn test_freshness_bonus() {
        let now = Utc::now();
        assert_eq!(freshness_bonus(None, now), 50.0);
        assert_eq!(freshness_bonus(Some(now), now), 0.0);
        assert_eq!(freshness_bonus(Some(now - Duration::days(3)), now), 6.0);
        assert_eq!(freshness_bonus(Some(now - Duration::hours(47)), now), 2.0);
        assert_eq!(freshness_bonus(Some(now - Duration::days(400)), now), 50.0);
        // Clock skew: future timestamps give no bonus rather than a penalty
        assert_eq!(freshness_bonus(Some(now + Duration::days(2)), now), 0.0);
    }

    #[test]
    fn test_difficulty_and_read_time_bonus() {
        let now = Utc::now();
        let mut c = candidate(0, None);

        c.topic.difficulty = Difficulty::Intermediate;
        assert_eq!(calculate_topic_score(&c, now), 275.0);

        c.topic.difficulty = Difficulty::Advanced;
        assert_eq!(calculate_topic_score(&c, now), 265.0);

        c.topic.estimated_read_time = 9;
        assert_eq!(calculate_topic_score(&c, now), 255.0);

        c.topic.estimated_read_time = 5;
        assert_eq!(calculate_topic_score(&c, now), 265.0);
    }

    #[test]
    fn test_category_weight_bonus() {
        let now = Utc::now();
        let mut c = candidate(0, None);
        c.category_weight = 0.25;
        assert_eq!(calculate_topic_score(&c, now), 205.0);
    }
}
