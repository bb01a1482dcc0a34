//! Advisory quality grading for drafted articles.
//!
//! The grade is a shallow, rule-based proxy made of three sub-scores:
//! SEO surface signals, readability surface signals and how "human" the prose
//! reads. It never blocks publication and never fails; a missing metadata
//! field just fails the checks that need it.

pub mod model;
pub mod scorer;
pub mod text;

pub use model::{ArticleMetadata, ContentMetrics, QualityReport};
pub use scorer::{QualityScorer, ScorerConfig, validate_content_quality};
