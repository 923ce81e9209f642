//! Typed payloads for each analysis mode.
//!
//! These are the strict parse boundary for model replies: every field a
//! mode's consumers rely on is required, so a reply that drops or
//! mistypes one rejects and falls back instead of leaking a partial
//! payload. Unknown keys are ignored. Wire names are camelCase.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Evolve
// ---------------------------------------------------------------------------

/// 0-100 ratings attached to an evolved variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub impact: i32,
    pub cost: i32,
    pub feasibility: i32,
}

/// One evolved take on the submitted idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub scores: Scores,
    pub strengths: Vec<String>,
    pub tradeoffs: Vec<String>,
}

/// Reply shape for the evolve mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolveResponse {
    pub variants: Vec<Variant>,
}

// ---------------------------------------------------------------------------
// Analyze
// ---------------------------------------------------------------------------

/// Demand/competition rating for one market category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataPoint {
    pub category: String,
    pub demand: i32,
    pub competition: i32,
}

/// One axis of the radar assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarDataPoint {
    pub subject: String,
    pub score: i32,
}

/// Reply shape for the analyze mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    pub clarity: i32,
    pub market_fit: i32,
    pub competition: Vec<String>,
    pub suggestions: Vec<String>,
    pub market_data: Vec<MarketDataPoint>,
    pub radar_data: Vec<RadarDataPoint>,
}

// ---------------------------------------------------------------------------
// Business insights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessModel {
    pub primary_model: String,
    pub target_market: String,
    pub revenue_streams: Vec<String>,
    pub customer_segments: Vec<String>,
    pub competitive_advantage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub model: String,
    pub range: String,
}

/// One slice of the revenue-breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSlice {
    pub name: String,
    pub value: i32,
    /// Hex color the chart renders the slice with.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monetization {
    pub pricing: Pricing,
    pub ltv: String,
    pub cac: String,
    pub breakeven: String,
    pub revenue_breakdown: Vec<RevenueSlice>,
}

/// One launch phase in the go-to-market plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub phase: String,
    pub duration: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoToMarket {
    pub strategy: String,
    pub timeline: String,
    pub channels: Vec<String>,
    pub milestones: Vec<Milestone>,
    pub risks: Vec<String>,
}

/// Reply shape for the business-insights mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInsights {
    pub business_model: BusinessModel,
    pub monetization: Monetization,
    pub go_to_market: GoToMarket,
}

// ---------------------------------------------------------------------------
// Roast
// ---------------------------------------------------------------------------

/// Reply shape for the roast mode.
///
/// The prompt spells one key as `"redeeming qualities"`; the alias
/// accepts replies that follow it literally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastReport {
    pub overall_rating: i32,
    pub savage_roast: String,
    pub major_flaws: Vec<String>,
    pub market_reality: String,
    pub who_will_actually_use: String,
    pub why_it_will_fail: String,
    #[serde(alias = "redeeming qualities")]
    pub redeeming_qualities: Vec<String>,
    pub advice_if_you_insist: String,
    pub similar_failures: Vec<String>,
    pub verdict: String,
}

// ---------------------------------------------------------------------------
// Research
// ---------------------------------------------------------------------------

/// First-stage reply: is the idea research-oriented at all?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchClassification {
    pub is_research: bool,
    #[serde(default)]
    pub research_area: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedPaper {
    pub title: String,
    pub authors: String,
    pub year: String,
    pub relevance: String,
    pub key_findings: String,
    pub url: String,
}

/// Second-stage reply: papers and directions for a research idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchFindings {
    pub research_area: String,
    pub suggested_papers: Vec<SuggestedPaper>,
    pub research_directions: Vec<String>,
    pub methodologies: Vec<String>,
    pub key_researchers: Vec<String>,
    pub related_conferences: Vec<String>,
    pub funding_opportunities: Vec<String>,
}

/// Wire response for the research mode, covering all three outcomes:
/// research idea with findings, non-research idea, and pipeline failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResponse {
    pub is_research: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Flattened into the response body; absent entirely when `None`.
    #[serde(flatten)]
    pub findings: Option<ResearchFindings>,
}

impl ResearchResponse {
    /// A research-oriented idea with generated findings.
    pub fn research(findings: ResearchFindings) -> Self {
        ResearchResponse {
            is_research: true,
            message: None,
            error: None,
            findings: Some(findings),
        }
    }

    /// The classifier decided the idea is not research-oriented.
    pub fn not_research() -> Self {
        ResearchResponse {
            is_research: false,
            message: Some("This idea doesn't appear to be research-oriented.".into()),
            error: None,
            findings: None,
        }
    }

    /// Either pipeline stage failed. Research has no generic fallback
    /// literal; it reports the failure in-band instead.
    pub fn failed() -> Self {
        ResearchResponse {
            is_research: false,
            message: None,
            error: Some("Failed to fetch research data".into()),
            findings: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Debate and mixer
// ---------------------------------------------------------------------------

/// One turn in the optimist/skeptic debate. `role` alternates
/// `user` (optimist) and `assistant` (skeptic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateMessage {
    pub role: String,
    pub content: String,
}

/// Reply shape for the debate mode: six alternating messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateTranscript {
    pub messages: Vec<DebateMessage>,
}

/// Reply shape for the idea-mixer mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixedIdea {
    pub mixed_idea: String,
}
