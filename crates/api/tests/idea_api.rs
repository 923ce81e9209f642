//! Integration tests for the idea-analysis endpoints.
//!
//! Exercise the full router (middleware stack included) with stub
//! generators: validation failures must surface as 400s, generation
//! failures must degrade to the exact fallback literals with a 200, and
//! clean replies must pass through.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{build_test_app, expect_json, post_json, FailingGenerator, StubGenerator};
use ideaforge_genai::fallback;
use serde_json::json;

// ---------------------------------------------------------------------------
// Validation failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analyze_rejects_a_nineteen_char_idea() {
    let app = build_test_app(Arc::new(FailingGenerator));
    let idea = "a".repeat(19);

    let response = post_json(app, "/api/analyze", json!({ "idea": idea })).await;
    let body = expect_json(response, StatusCode::BAD_REQUEST).await;

    assert_eq!(body["error"], "Idea too short for analysis");
}

#[tokio::test]
async fn analyze_rejects_a_missing_idea() {
    let app = build_test_app(Arc::new(FailingGenerator));

    let response = post_json(app, "/api/analyze", json!({})).await;
    let body = expect_json(response, StatusCode::BAD_REQUEST).await;

    assert_eq!(body["error"], "Idea too short for analysis");
}

#[tokio::test]
async fn evolve_rejects_a_missing_goal() {
    let app = build_test_app(Arc::new(FailingGenerator));

    let response = post_json(app, "/api/evolve", json!({ "idea": "a study app" })).await;
    let body = expect_json(response, StatusCode::BAD_REQUEST).await;

    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn business_insights_rejects_a_missing_idea() {
    let app = build_test_app(Arc::new(FailingGenerator));

    let response = post_json(app, "/api/business-insights", json!({ "goal": "impact" })).await;
    let body = expect_json(response, StatusCode::BAD_REQUEST).await;

    assert_eq!(body["error"], "Missing idea");
}

#[tokio::test]
async fn roast_rejects_a_missing_idea() {
    let app = build_test_app(Arc::new(FailingGenerator));

    let response = post_json(app, "/api/roast", json!({})).await;
    let body = expect_json(response, StatusCode::BAD_REQUEST).await;

    assert_eq!(body["error"], "Idea is required");
}

// ---------------------------------------------------------------------------
// Degraded mode: generation failures still answer 200 with the fallback
// ---------------------------------------------------------------------------

#[tokio::test]
async fn analyze_serves_the_fallback_when_generation_fails() {
    let app = build_test_app(Arc::new(FailingGenerator));
    let idea = "a".repeat(20); // exactly at the length floor

    let response = post_json(app, "/api/analyze", json!({ "idea": idea })).await;
    let body = expect_json(response, StatusCode::OK).await;

    // Deep equality with the named fallback literal.
    assert_eq!(body, serde_json::to_value(fallback::analyze()).unwrap());

    let clarity = body["clarity"].as_i64().unwrap();
    let market_fit = body["marketFit"].as_i64().unwrap();
    assert!((0..=100).contains(&clarity));
    assert!((0..=100).contains(&market_fit));
}

#[tokio::test]
async fn evolve_serves_the_three_fallback_variants_when_generation_fails() {
    let app = build_test_app(Arc::new(FailingGenerator));

    let response = post_json(
        app,
        "/api/evolve",
        json!({ "idea": "a study app", "goal": "impact" }),
    )
    .await;
    let body = expect_json(response, StatusCode::OK).await;

    assert_eq!(body, serde_json::to_value(fallback::evolve()).unwrap());

    let titles: Vec<&str> = body["variants"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        [
            "High-Impact Community Platform",
            "Lean MVP Launch Strategy",
            "Balanced Growth Platform",
        ]
    );
}

#[tokio::test]
async fn debate_and_mixer_fall_back_without_validation() {
    // Neither endpoint validates its input; both still answer 200.
    let app = build_test_app(Arc::new(FailingGenerator));
    let response = post_json(app, "/api/ai-debate", json!({})).await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body["messages"].as_array().unwrap().len(), 6);

    let app = build_test_app(Arc::new(FailingGenerator));
    let response = post_json(app, "/api/idea-mixer", json!({})).await;
    let body = expect_json(response, StatusCode::OK).await;
    assert_eq!(body, serde_json::to_value(fallback::mix()).unwrap());
}

#[tokio::test]
async fn research_reports_failure_in_band_instead_of_a_fallback() {
    let app = build_test_app(Arc::new(FailingGenerator));

    let response = post_json(app, "/api/research", json!({ "idea": "quantum computing" })).await;
    let body = expect_json(response, StatusCode::OK).await;

    assert_eq!(body["isResearch"], false);
    assert_eq!(body["error"], "Failed to fetch research data");
    assert!(body.get("suggestedPapers").is_none());
}

// ---------------------------------------------------------------------------
// Live replies pass through
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mixer_passes_a_clean_reply_through() {
    let app = build_test_app(Arc::new(StubGenerator(
        r#"{"mixedIdea": "A hybrid study-and-recipe app."}"#,
    )));

    let response = post_json(
        app,
        "/api/idea-mixer",
        json!({ "idea1": "study app", "idea2": "recipe app" }),
    )
    .await;
    let body = expect_json(response, StatusCode::OK).await;

    assert_eq!(body["mixedIdea"], "A hybrid study-and-recipe app.");
}

#[tokio::test]
async fn roast_parses_a_fenced_reply() {
    let reply = r#"Here you go:
```json
{
  "overallRating": 4,
  "savageRoast": "Bold of you to call this new.",
  "majorFlaws": ["no moat"],
  "marketReality": "crowded",
  "whoWillActuallyUse": "early adopters",
  "whyItWillFail": "distribution",
  "redeemingQualities": ["clear problem"],
  "adviceIfYouInsist": "niche down",
  "similarFailures": ["many"],
  "verdict": "needs work"
}
```"#;
    let app = build_test_app(Arc::new(StubGenerator(reply)));

    let response = post_json(app, "/api/roast", json!({ "idea": "an app" })).await;
    let body = expect_json(response, StatusCode::OK).await;

    assert_eq!(body["overallRating"], 4);
    assert_eq!(body["verdict"], "needs work");
}
