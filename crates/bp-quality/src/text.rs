//! Text measurements over Markdown drafts.
//!
//! Everything here is a plain pattern count. Markdown is not parsed, so code
//! blocks and quotes are counted like any other text.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ArticleMetadata, ContentMetrics};

static HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^##[ \t]+\S").unwrap());
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]\(\s*([^)\s]+)[^)]*\)").unwrap());
static EXTERNAL_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?://").unwrap());
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*\n").unwrap());
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.(?:\s|$)").unwrap());
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*+][ \t]+\S").unwrap());
static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\d+[.)][ \t]+\S").unwrap());
static CONTRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:[a-z]+n't|i'm|i've|i'll|i'd|(?:you|we|they)'(?:re|ve|ll|d)|(?:it|that|there|here|what|who|let|he|she)'s)\b",
    )
    .unwrap()
});
static PRONOUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:you|your|we|our|i)\b").unwrap());
static TRANSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:however|furthermore|moreover|meanwhile|in fact|that said|on the other hand|let's be honest|here's the thing)\b",
    )
    .unwrap()
});

/// Stock phrases that make prose read as machine-written
pub const AI_PHRASES: &[&str] = &[
    "in today's digital landscape",
    "in today's fast-paced world",
    "in the ever-evolving world",
    "it's important to note that",
    "delve into",
    "navigate the complexities",
    "a testament to",
    "unlock the power of",
    "in the realm of",
    "harness the power of",
    "embark on a journey",
    "game-changer",
];

/// Measure every count the scorer needs.
pub fn measure(
    content: &str,
    metadata: &ArticleMetadata,
    internal_link_prefix: &str,
) -> ContentMetrics {
    let text = fold_apostrophes(content);
    let (internal_link_count, external_link_count) = count_links(&text, internal_link_prefix);

    ContentMetrics {
        word_count: word_count(&text),
        title_length: metadata.title.as_deref().map(char_length),
        meta_description_length: metadata.meta_description.as_deref().map(char_length),
        header_count: HEADER.find_iter(&text).count(),
        internal_link_count,
        external_link_count,
        longest_paragraph_sentences: longest_paragraph_sentences(&text),
        bullet_count: BULLET.find_iter(&text).count(),
        numbered_count: NUMBERED.find_iter(&text).count(),
        contraction_count: CONTRACTION.find_iter(&text).count(),
        question_count: text.matches('?').count(),
        pronoun_count: PRONOUN.find_iter(&text).count(),
        transition_count: TRANSITION.find_iter(&text).count(),
        ai_phrases: find_ai_phrases(&text),
    }
}

/// Typographic apostrophes count the same as ASCII ones
fn fold_apostrophes(s: &str) -> String {
    s.replace(['\u{2019}', '\u{2018}'], "'")
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn char_length(s: &str) -> usize {
    s.trim().chars().count()
}

/// Count Markdown links as `(internal, external)`.
///
/// External links start with `http://` or `https://`. Internal links start
/// with `internal_prefix` but are not protocol-relative (`//host/...`).
pub fn count_links(text: &str, internal_prefix: &str) -> (usize, usize) {
    LINK.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|target| target.as_str())
        .fold((0, 0), |(internal, external), target| {
            if EXTERNAL_URL.is_match(target) {
                (internal, external + 1)
            } else if target.starts_with(internal_prefix) && !target.starts_with("//") {
                (internal + 1, external)
            } else {
                (internal, external)
            }
        })
}

/// Highest count of sentence-ending periods in any blank-line separated block
pub fn longest_paragraph_sentences(text: &str) -> usize {
    PARAGRAPH_BREAK
        .split(text)
        .map(|p| SENTENCE_END.find_iter(p.trim()).count())
        .max()
        .unwrap_or(0)
}

fn find_ai_phrases(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    AI_PHRASES
        .iter()
        .filter(|phrase| lower.contains(*phrase))
        .map(|phrase| (*phrase).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(content: &str) -> ContentMetrics {
        measure(content, &ArticleMetadata::default(), "/")
    }

    #[test]
    fn test_headers_only_count_h2() {
        let m = metrics("# Title\n## One\n### Sub\n## Two\n##NoSpace\n  ## indented");
        assert_eq!(m.header_count, 2);
    }

    #[test]
    fn test_link_classification() {
        let text = "See [a](/blog/a), [b](/blog/b \"title\"), [c](https://example.com), \
                    [d](HTTP://example.org), [e](//cdn.example.com/x), [f](#anchor), \
                    [g](mailto:x@example.com) and ![img](/images/x.png).";
        assert_eq!(count_links(text, "/"), (3, 2));
        assert_eq!(count_links(text, "/blog/"), (2, 2));
    }

    #[test]
    fn test_paragraph_sentences() {
        let text = "One. Two. Three.\n\nOne. Two. Three. Four. Five.\n  \nVersion 1.5 is out.";
        assert_eq!(longest_paragraph_sentences(text), 5);
        assert_eq!(longest_paragraph_sentences(""), 0);
    }

    #[test]
    fn test_list_counts() {
        let text = "- one\n* two\n+ three\n  - nested\n**bold** line\n---\n1. first\n2) second\n10. tenth\n3.5 not a list";
        let m = metrics(text);
        assert_eq!(m.bullet_count, 4);
        assert_eq!(m.numbered_count, 3);
    }

    #[test]
    fn test_contractions_and_curly_apostrophes() {
        let m = metrics("Don't panic. It’s fine, we're close and I'm sure you'll see. John's car.");
        assert_eq!(m.contraction_count, 5);
    }

    #[test]
    fn test_pronouns() {
        let m = metrics("You and your team. We love our readers. I think so. Yours, youth, outward.");
        assert_eq!(m.pronoun_count, 5);
    }

    #[test]
    fn test_transitions_and_questions() {
        let m = metrics(
            "However, this works. In fact it is fast. Let's be honest: is it? Really? Howeverish.",
        );
        assert_eq!(m.transition_count, 3);
        assert_eq!(m.question_count, 2);
    }

    #[test]
    fn test_ai_phrases() {
        let m = metrics("In Today's Digital Landscape we must Delve Into things.");
        assert_eq!(
            m.ai_phrases,
            vec!["in today's digital landscape".to_string(), "delve into".to_string()]
        );
        assert!(metrics("Plain words only.").ai_phrases.is_empty());
    }

    #[test]
    fn test_metadata_lengths() {
        let metadata = ArticleMetadata {
            title: Some("  Café guide  ".to_string()),
            meta_description: None,
            ..ArticleMetadata::default()
        };
        let m = measure("", &metadata, "/");
        assert_eq!(m.title_length, Some(10));
        assert_eq!(m.meta_description_length, None);
        assert_eq!(m.word_count, 0);
    }
}
