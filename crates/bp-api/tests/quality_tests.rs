use axum::http::StatusCode;
use bp_quality::QualityReport;
use serde_json::{Value, json};

use crate::common::{TestClient, TestStateBuilder, app};

fn client() -> TestClient {
    TestClient::new(app(TestStateBuilder::new().build()))
}

#[tokio::test]
async fn test_empty_draft() {
    let response = client()
        .post_json("/quality", &json!({ "content": "" }))
        .await;

    response.assert_status(StatusCode::OK);
    let report: QualityReport = response.json();
    assert_eq!(report.seo_score, 0);
    // Only the paragraph-length check passes
    assert_eq!(report.readability_score, 25);
    // Only the "no AI phrases" check passes
    assert_eq!(report.human_like_score, 20);
    assert_eq!(report.overall_score, 15);
    assert_eq!(report.metrics.word_count, 0);
    assert!(
        report
            .issues
            .iter()
            .any(|issue| issue.starts_with("Missing title"))
    );
}

#[tokio::test]
async fn test_seo_checks_with_metadata() {
    let content = "## One\n\nRead [the basics](/blog/basics) and [the follow-up](/blog/next).\n\n\
                   ## Two\n\nSee [MDN](https://developer.mozilla.org).\n\n## Three\n\nDone.";
    let body = json!({
        "content": content,
        "metadata": {
            "title": "t".repeat(55),
            "metaDescription": "d".repeat(152),
        }
    });

    let response = client().post_json("/quality", &body).await;

    response.assert_status(StatusCode::OK);
    let report: QualityReport = response.json();
    assert_eq!(report.seo_score, 100);
    assert_eq!(report.metrics.header_count, 3);
    assert_eq!(report.metrics.internal_link_count, 2);
    assert_eq!(report.metrics.external_link_count, 1);
    assert_eq!(report.metrics.title_length, Some(55));
}

#[tokio::test]
async fn test_ai_phrases_are_reported() {
    let body = json!({
        "content": "In today's digital landscape, we delve into caching.",
        "metadata": { "title": "Caching" }
    });

    let response = client().post_json("/quality", &body).await;

    response.assert_status(StatusCode::OK);
    let raw: Value = response.json();
    assert_eq!(
        raw["metrics"]["aiPhrases"],
        json!(["in today's digital landscape", "delve into"])
    );
    assert!(
        raw["issues"]
            .as_array()
            .unwrap()
            .iter()
            .any(|issue| issue.as_str().unwrap().contains("delve into"))
    );
    assert!(raw["humanLikeScore"].as_u64().unwrap() < 100);
}

#[tokio::test]
async fn test_missing_content_is_rejected() {
    let response = client()
        .post_json("/quality", &json!({ "metadata": { "title": "No body" } }))
        .await;

    assert!(response.status.is_client_error());
}
