//! Handlers for the idea-analysis endpoints.
//!
//! Thin wrappers over [`ideaforge_genai::service`]: validate the input,
//! run the mode, and answer 200 with whatever the orchestration
//! produced -- a live payload or the mode's fallback literal. Only input
//! validation can fail these endpoints.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use ideaforge_core::error::CoreError;
use ideaforge_core::repo::validate_analyze_idea;
use ideaforge_genai::service;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for the single-idea modes (analyze, roast, research,
/// ai-debate). Missing fields deserialize as empty and fail validation
/// where the mode requires them.
#[derive(Debug, Deserialize)]
pub struct IdeaRequest {
    #[serde(default)]
    pub idea: String,
}

/// Request body for `POST /api/evolve` and `POST /api/business-insights`.
#[derive(Debug, Deserialize)]
pub struct IdeaGoalRequest {
    #[serde(default)]
    pub idea: String,
    #[serde(default)]
    pub goal: String,
}

/// Request body for `POST /api/idea-mixer`.
#[derive(Debug, Deserialize)]
pub struct MixRequest {
    #[serde(default)]
    pub idea1: String,
    #[serde(default)]
    pub idea2: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/evolve
///
/// Generate three goal-optimized variants of the idea.
pub async fn evolve(
    State(state): State<AppState>,
    Json(input): Json<IdeaGoalRequest>,
) -> AppResult<impl IntoResponse> {
    if input.idea.is_empty() || input.goal.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Missing required fields".into(),
        )));
    }

    let outcome = service::evolve(&*state.generator, &input.idea, &input.goal).await;
    Ok(Json(outcome.into_inner()))
}

/// POST /api/analyze
///
/// Score an idea for clarity, market fit, and competition. Rejects ideas
/// shorter than 20 characters.
pub async fn analyze(
    State(state): State<AppState>,
    Json(input): Json<IdeaRequest>,
) -> AppResult<impl IntoResponse> {
    validate_analyze_idea(&input.idea).map_err(AppError::Core)?;

    let outcome = service::analyze(&*state.generator, &input.idea).await;
    Ok(Json(outcome.into_inner()))
}

/// POST /api/business-insights
///
/// Business model, monetization, and go-to-market analysis.
pub async fn business_insights(
    State(state): State<AppState>,
    Json(input): Json<IdeaGoalRequest>,
) -> AppResult<impl IntoResponse> {
    if input.idea.is_empty() {
        return Err(AppError::Core(CoreError::Validation("Missing idea".into())));
    }

    let outcome = service::business_insights(&*state.generator, &input.idea, &input.goal).await;
    Ok(Json(outcome.into_inner()))
}

/// POST /api/roast
///
/// Brutally honest critique of the idea.
pub async fn roast(
    State(state): State<AppState>,
    Json(input): Json<IdeaRequest>,
) -> AppResult<impl IntoResponse> {
    if input.idea.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Idea is required".into(),
        )));
    }

    let outcome = service::roast(&*state.generator, &input.idea).await;
    Ok(Json(outcome.into_inner()))
}

/// POST /api/research
///
/// Two-stage pipeline: classify, then suggest papers for
/// research-oriented ideas. Failures report in-band instead of falling
/// back to canned citations.
pub async fn research(
    State(state): State<AppState>,
    Json(input): Json<IdeaRequest>,
) -> AppResult<impl IntoResponse> {
    if input.idea.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Idea is required".into(),
        )));
    }

    let response = service::research(&*state.generator, &input.idea).await;
    Ok(Json(response))
}

/// POST /api/ai-debate
///
/// Six-message optimist/skeptic debate about the idea.
pub async fn debate(
    State(state): State<AppState>,
    Json(input): Json<IdeaRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = service::debate(&*state.generator, &input.idea).await;
    Ok(Json(outcome.into_inner()))
}

/// POST /api/idea-mixer
///
/// Combine two ideas into a hybrid concept.
pub async fn mix(
    State(state): State<AppState>,
    Json(input): Json<MixRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = service::mix(&*state.generator, &input.idea1, &input.idea2).await;
    Ok(Json(outcome.into_inner()))
}
