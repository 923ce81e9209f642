//! Per-mode orchestration: prompt, generate, extract, parse, fall back.
//!
//! Every mode funnels through [`generate_payload`]; any failure past
//! input validation (which the HTTP layer handles) degrades to the
//! mode's fallback literal rather than surfacing an error. Research is
//! the exception: it reports failure in-band instead of faking papers.

use serde::de::DeserializeOwned;

use crate::client::{GenAiError, TextGenerator};
use crate::extract::extract_json;
use crate::types::{
    AnalysisData, BusinessInsights, DebateTranscript, EvolveResponse, MixedIdea,
    ResearchClassification, ResearchFindings, ResearchResponse, RoastReport,
};
use crate::{fallback, prompts};

/// How a payload was produced.
///
/// `Fallback` means the external call or its parsing failed and the
/// canned literal was served instead; the HTTP status is 200 either way.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Parsed from a live model reply.
    Generated(T),
    /// The named degraded-mode literal.
    Fallback(T),
}

impl<T> Outcome<T> {
    /// The payload, however it was produced.
    pub fn into_inner(self) -> T {
        match self {
            Outcome::Generated(value) | Outcome::Fallback(value) => value,
        }
    }

    /// True when the degraded-mode literal was served.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }
}

/// Why a generation attempt produced no usable payload.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Client(#[from] GenAiError),

    /// Neither extraction strategy found a JSON substring in the reply.
    #[error("No JSON found in model reply")]
    MissingJson,

    /// The extracted substring failed JSON parsing or schema validation.
    #[error("Model reply did not match the expected shape: {0}")]
    Schema(#[from] serde_json::Error),
}

/// Run one generation call and parse the reply into `T`.
async fn generate_payload<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    prompt: &str,
) -> Result<T, GenerationError> {
    let text = generator.generate(prompt).await?;
    let json = extract_json(&text).ok_or(GenerationError::MissingJson)?;
    Ok(serde_json::from_str(json)?)
}

/// Run a mode end to end, degrading to `fallback` on any failure.
async fn with_fallback<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    mode: &'static str,
    prompt: String,
    fallback: fn() -> T,
) -> Outcome<T> {
    match generate_payload::<T>(generator, &prompt).await {
        Ok(payload) => Outcome::Generated(payload),
        Err(err) => {
            tracing::warn!(mode, error = %err, "Generation failed, serving fallback payload");
            Outcome::Fallback(fallback())
        }
    }
}

/// Evolve an idea into three goal-optimized variants.
pub async fn evolve(
    generator: &dyn TextGenerator,
    idea: &str,
    goal: &str,
) -> Outcome<EvolveResponse> {
    with_fallback(
        generator,
        "evolve",
        prompts::evolve(idea, goal),
        fallback::evolve,
    )
    .await
}

/// Score an idea for clarity, market fit, and competition.
pub async fn analyze(generator: &dyn TextGenerator, idea: &str) -> Outcome<AnalysisData> {
    with_fallback(generator, "analyze", prompts::analyze(idea), fallback::analyze).await
}

/// Produce business-model, monetization, and go-to-market insights.
pub async fn business_insights(
    generator: &dyn TextGenerator,
    idea: &str,
    goal: &str,
) -> Outcome<BusinessInsights> {
    with_fallback(
        generator,
        "business-insights",
        prompts::business_insights(idea, goal),
        fallback::business_insights,
    )
    .await
}

/// Roast an idea.
pub async fn roast(generator: &dyn TextGenerator, idea: &str) -> Outcome<RoastReport> {
    with_fallback(generator, "roast", prompts::roast(idea), fallback::roast).await
}

/// Generate the optimist/skeptic debate transcript.
pub async fn debate(generator: &dyn TextGenerator, idea: &str) -> Outcome<DebateTranscript> {
    with_fallback(generator, "ai-debate", prompts::debate(idea), fallback::debate).await
}

/// Combine two ideas into a hybrid concept.
pub async fn mix(generator: &dyn TextGenerator, idea1: &str, idea2: &str) -> Outcome<MixedIdea> {
    with_fallback(
        generator,
        "idea-mixer",
        prompts::mix(idea1, idea2),
        fallback::mix,
    )
    .await
}

/// Two-stage research pipeline: classify first, then suggest papers only
/// for research-oriented ideas.
///
/// Unlike the other modes there is no canned literal here -- a failure in
/// either stage reports `{isResearch: false, error}` so the caller never
/// sees fabricated citations.
pub async fn research(generator: &dyn TextGenerator, idea: &str) -> ResearchResponse {
    let classification = match generate_payload::<ResearchClassification>(
        generator,
        &prompts::research_classification(idea),
    )
    .await
    {
        Ok(classification) => classification,
        Err(err) => {
            tracing::warn!(error = %err, "Research classification failed");
            return ResearchResponse::failed();
        }
    };

    if !classification.is_research {
        return ResearchResponse::not_research();
    }

    let area = classification.research_area.as_deref().unwrap_or("general");
    match generate_payload::<ResearchFindings>(generator, &prompts::research_suggestions(idea, area))
        .await
    {
        Ok(findings) => ResearchResponse::research(findings),
        Err(err) => {
            tracing::warn!(error = %err, "Research suggestion generation failed");
            ResearchResponse::failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    /// Generator that always returns the same canned text.
    struct FixedReply(&'static str);

    #[async_trait]
    impl TextGenerator for FixedReply {
        async fn generate(&self, _prompt: &str) -> Result<String, GenAiError> {
            Ok(self.0.to_string())
        }
    }

    /// Generator that always fails at the transport level.
    struct AlwaysFails;

    #[async_trait]
    impl TextGenerator for AlwaysFails {
        async fn generate(&self, _prompt: &str) -> Result<String, GenAiError> {
            Err(GenAiError::Api {
                status: 503,
                body: "overloaded".into(),
            })
        }
    }

    /// Generator that answers the classification prompt one way and every
    /// other prompt another way.
    struct TwoStage {
        classification: &'static str,
        suggestions: &'static str,
    }

    #[async_trait]
    impl TextGenerator for TwoStage {
        async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
            if prompt.contains("research-oriented (academic") {
                Ok(self.classification.to_string())
            } else {
                Ok(self.suggestions.to_string())
            }
        }
    }

    const GOOD_MIX_REPLY: &str = r#"Sure! ```json
{"mixedIdea": "A hybrid of both."}
``` "#;

    #[tokio::test]
    async fn clean_reply_is_generated_not_fallback() {
        let outcome = mix(&FixedReply(GOOD_MIX_REPLY), "a", "b").await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.into_inner().mixed_idea, "A hybrid of both.");
    }

    #[tokio::test]
    async fn transport_failure_serves_the_fallback() {
        let outcome = evolve(&AlwaysFails, "an idea", "impact").await;
        assert!(outcome.is_fallback());
        let payload = outcome.into_inner();
        assert_eq!(payload, fallback::evolve());
    }

    #[tokio::test]
    async fn non_json_reply_serves_the_fallback() {
        let outcome = roast(&FixedReply("I'd rather not be mean today."), "idea").await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.into_inner(), fallback::roast());
    }

    #[tokio::test]
    async fn schema_mismatch_serves_the_fallback() {
        // Valid JSON, wrong shape: variants entries missing scores.
        let reply = r#"{"variants": [{"title": "x"}]}"#;
        let outcome = evolve(&FixedReply(reply), "idea", "cost").await;
        assert!(outcome.is_fallback());
    }

    #[tokio::test]
    async fn analysis_with_extra_keys_still_parses() {
        let reply = r#"{
            "clarity": 81, "marketFit": 64,
            "competition": ["A"], "suggestions": ["B"],
            "marketData": [{"category": "C", "demand": 50, "competition": 40}],
            "radarData": [{"subject": "Innovation", "score": 70}],
            "confidence": "high"
        }"#;
        let outcome = analyze(&FixedReply(reply), "a sufficiently long idea").await;
        assert!(!outcome.is_fallback());
        let payload = outcome.into_inner();
        assert_eq!(payload.clarity, 81);
        assert_eq!(payload.market_fit, 64);
    }

    #[tokio::test]
    async fn roast_accepts_the_prompt_literal_key_spelling() {
        let reply = r#"{
            "overallRating": 2,
            "savageRoast": "Ouch.",
            "majorFlaws": ["everything"],
            "marketReality": "grim",
            "whoWillActuallyUse": "nobody",
            "whyItWillFail": "reasons",
            "redeeming qualities": ["brevity"],
            "adviceIfYouInsist": "don't",
            "similarFailures": ["many"],
            "verdict": "no"
        }"#;
        let outcome = roast(&FixedReply(reply), "idea").await;
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.into_inner().redeeming_qualities, vec!["brevity"]);
    }

    #[tokio::test]
    async fn research_classification_failure_reports_in_band() {
        let response = research(&AlwaysFails, "quantum error correction").await;
        assert!(!response.is_research);
        assert_eq!(response.error.as_deref(), Some("Failed to fetch research data"));
        assert!(response.findings.is_none());
    }

    #[tokio::test]
    async fn non_research_idea_short_circuits_the_second_stage() {
        let generator = TwoStage {
            classification: r#"{"isResearch": false}"#,
            // Would fail to parse as findings; must never be requested.
            suggestions: "unreachable",
        };
        let response = research(&generator, "a sandwich shop").await;
        assert!(!response.is_research);
        assert_eq!(
            response.message.as_deref(),
            Some("This idea doesn't appear to be research-oriented.")
        );
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn research_idea_runs_both_stages() {
        let generator = TwoStage {
            classification: r#"{"isResearch": true, "researchArea": "NLP", "keywords": ["llm"]}"#,
            suggestions: r#"{
                "researchArea": "NLP",
                "suggestedPapers": [{
                    "title": "Attention Is All You Need",
                    "authors": "Vaswani et al.",
                    "year": "2017",
                    "relevance": "foundational architecture",
                    "keyFindings": "transformers outperform recurrence",
                    "url": "https://arxiv.org/abs/1706.03762"
                }],
                "researchDirections": ["efficient attention"],
                "methodologies": ["ablation studies"],
                "keyResearchers": ["Vaswani"],
                "relatedConferences": ["NeurIPS"],
                "fundingOpportunities": ["NSF"]
            }"#,
        };
        let response = research(&generator, "better transformer attention").await;
        assert!(response.is_research);
        let findings = response.findings.expect("findings should be present");
        assert_eq!(findings.research_area, "NLP");
        assert_eq!(findings.suggested_papers.len(), 1);
    }

    #[tokio::test]
    async fn second_stage_failure_reports_in_band() {
        let generator = TwoStage {
            classification: r#"{"isResearch": true, "researchArea": "physics"}"#,
            suggestions: "the model rambled with no json here",
        };
        let response = research(&generator, "room-temperature superconductors").await;
        assert!(!response.is_research);
        assert_eq!(response.error.as_deref(), Some("Failed to fetch research data"));
    }
}
