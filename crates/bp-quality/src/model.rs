use serde::{Deserialize, Serialize};

/// Metadata produced alongside the article body by the drafting step
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleMetadata {
    pub title: Option<String>,
    /// Search snippet text, the only description the SEO checks look at
    pub meta_description: Option<String>,
    /// Longer summary shown on listing pages
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Raw counts measured on a draft, before any scoring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetrics {
    pub word_count: usize,
    /// Title length in characters, `None` when missing
    pub title_length: Option<usize>,
    /// Meta description length in characters, `None` when missing
    pub meta_description_length: Option<usize>,
    pub header_count: usize,
    pub internal_link_count: usize,
    pub external_link_count: usize,
    /// Highest number of sentence-ending periods in a single paragraph
    pub longest_paragraph_sentences: usize,
    pub bullet_count: usize,
    pub numbered_count: usize,
    pub contraction_count: usize,
    pub question_count: usize,
    pub pronoun_count: usize,
    pub transition_count: usize,
    /// Blacklisted phrases found in the text
    pub ai_phrases: Vec<String>,
}

/// Advisory grade for a drafted article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub seo_score: u32,
    pub readability_score: u32,
    pub human_like_score: u32,
    /// Rounded mean of the three sub-scores
    pub overall_score: u32,
    /// One remediation hint per failed check
    pub issues: Vec<String>,
    pub metrics: ContentMetrics,
}
