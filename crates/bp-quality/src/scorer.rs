use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{
    model::{ArticleMetadata, ContentMetrics, QualityReport},
    text,
};

const IDEAL_TITLE_LENGTH: RangeInclusive<usize> = 50..=60;
const IDEAL_META_DESCRIPTION_LENGTH: RangeInclusive<usize> = 150..=155;
const MIN_HEADERS: usize = 3;
const MIN_INTERNAL_LINKS: usize = 2;
const MIN_EXTERNAL_LINKS: usize = 1;

const IDEAL_WORD_COUNT: RangeInclusive<usize> = 1500..=3000;
const MIN_PARTIAL_WORD_COUNT: usize = 1000;
const PARTIAL_WORD_COUNT_POINTS: u32 = 15;
const MAX_PARAGRAPH_SENTENCES: usize = 4;
const MIN_BULLETS: usize = 5;
const MIN_NUMBERED: usize = 3;

const MIN_CONTRACTIONS: usize = 3;
const MIN_QUESTIONS: usize = 2;
const MIN_PRONOUNS: usize = 10;
const MIN_TRANSITIONS: usize = 3;

/// Points per SEO check (five checks)
const SEO_POINTS: u32 = 20;
/// Points per readability check (four checks)
const READABILITY_POINTS: u32 = 25;
/// Points per human-likeness check (five checks)
const HUMAN_POINTS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Link targets starting with this prefix count as internal links
    pub internal_link_prefix: String,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            internal_link_prefix: "/".to_string(),
        }
    }
}

/// Stateless grader; identical inputs always give an identical report.
#[derive(Debug, Clone, Default)]
pub struct QualityScorer {
    config: ScorerConfig,
}

impl QualityScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    /// Grade a draft. Never fails; the worst case is all-zero sub-scores.
    pub fn validate(&self, content: &str, metadata: &ArticleMetadata) -> QualityReport {
        let metrics = text::measure(content, metadata, &self.config.internal_link_prefix);
        let mut issues = Vec::new();

        let seo_score = seo_score(&metrics, &mut issues);
        let readability_score = readability_score(&metrics, &mut issues);
        let human_like_score = human_like_score(&metrics, &mut issues);

        // Rounded mean of three integers, half rounding up
        let overall_score = (seo_score + readability_score + human_like_score + 1) / 3;

        QualityReport {
            seo_score,
            readability_score,
            human_like_score,
            overall_score,
            issues,
            metrics,
        }
    }
}

/// Grade a draft with the default configuration.
pub fn validate_content_quality(content: &str, metadata: &ArticleMetadata) -> QualityReport {
    QualityScorer::default().validate(content, metadata)
}

fn seo_score(m: &ContentMetrics, issues: &mut Vec<String>) -> u32 {
    let mut score = 0;

    match m.title_length {
        Some(len) if IDEAL_TITLE_LENGTH.contains(&len) => score += SEO_POINTS,
        Some(len) => issues.push(format!(
            "Title is {len} characters; aim for 50-60 characters"
        )),
        None => issues.push("Missing title; add one of 50-60 characters".to_string()),
    }

    match m.meta_description_length {
        Some(len) if IDEAL_META_DESCRIPTION_LENGTH.contains(&len) => score += SEO_POINTS,
        Some(len) => issues.push(format!(
            "Meta description is {len} characters; aim for 150-155 characters"
        )),
        None => issues.push("Missing meta description; add one of 150-155 characters".to_string()),
    }

    if m.header_count >= MIN_HEADERS {
        score += SEO_POINTS;
    } else {
        issues.push(format!(
            "Only {} section headers (##); use at least {MIN_HEADERS}",
            m.header_count
        ));
    }

    if m.internal_link_count >= MIN_INTERNAL_LINKS {
        score += SEO_POINTS;
    } else {
        issues.push(format!(
            "Only {} internal links; link at least {MIN_INTERNAL_LINKS} related posts",
            m.internal_link_count
        ));
    }

    if m.external_link_count >= MIN_EXTERNAL_LINKS {
        score += SEO_POINTS;
    } else {
        issues.push("No external links; cite at least one authoritative source".to_string());
    }

    score
}

fn readability_score(m: &ContentMetrics, issues: &mut Vec<String>) -> u32 {
    let mut score = 0;

    if IDEAL_WORD_COUNT.contains(&m.word_count) {
        score += READABILITY_POINTS;
    } else if m.word_count >= MIN_PARTIAL_WORD_COUNT {
        score += PARTIAL_WORD_COUNT_POINTS;
        issues.push(format!(
            "Word count is {}; the ideal range is 1500-3000 words",
            m.word_count
        ));
    } else {
        issues.push(format!(
            "Word count is {}; articles under 1000 words read as thin",
            m.word_count
        ));
    }

    if m.longest_paragraph_sentences <= MAX_PARAGRAPH_SENTENCES {
        score += READABILITY_POINTS;
    } else {
        issues.push(format!(
            "A paragraph has {} sentences; keep paragraphs to {MAX_PARAGRAPH_SENTENCES} or fewer",
            m.longest_paragraph_sentences
        ));
    }

    if m.bullet_count >= MIN_BULLETS {
        score += READABILITY_POINTS;
    } else {
        issues.push(format!(
            "Only {} bullet points; use at least {MIN_BULLETS}",
            m.bullet_count
        ));
    }

    if m.numbered_count >= MIN_NUMBERED {
        score += READABILITY_POINTS;
    } else {
        issues.push(format!(
            "Only {} numbered list items; use at least {MIN_NUMBERED}",
            m.numbered_count
        ));
    }

    score
}

fn human_like_score(m: &ContentMetrics, issues: &mut Vec<String>) -> u32 {
    let mut score = 0;

    if m.contraction_count >= MIN_CONTRACTIONS {
        score += HUMAN_POINTS;
    } else {
        issues.push(format!(
            "Only {} contractions; use at least {MIN_CONTRACTIONS} for a conversational tone",
            m.contraction_count
        ));
    }

    if m.question_count >= MIN_QUESTIONS {
        score += HUMAN_POINTS;
    } else {
        issues.push(format!(
            "Only {} questions; ask the reader at least {MIN_QUESTIONS}",
            m.question_count
        ));
    }

    if m.pronoun_count >= MIN_PRONOUNS {
        score += HUMAN_POINTS;
    } else {
        issues.push(format!(
            "Only {} personal pronouns; address the reader directly at least {MIN_PRONOUNS} times",
            m.pronoun_count
        ));
    }

    if m.ai_phrases.is_empty() {
        score += HUMAN_POINTS;
    } else {
        issues.push(format!(
            "Remove AI-sounding phrases: {}",
            m.ai_phrases.join(", ")
        ));
    }

    if m.transition_count >= MIN_TRANSITIONS {
        score += HUMAN_POINTS;
    } else {
        issues.push(format!(
            "Only {} transition phrases; use at least {MIN_TRANSITIONS}",
            m.transition_count
        ));
    }

    score
}
