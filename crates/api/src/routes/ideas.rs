//! Route definitions for the idea-analysis endpoints.
//!
//! These mount directly under `/api` (no resource prefix), one route per
//! analysis mode.

use axum::routing::post;
use axum::Router;

use crate::handlers::ideas;
use crate::state::AppState;

/// Analysis routes mounted at the `/api` root.
///
/// ```text
/// POST /analyze            -> analyze
/// POST /evolve             -> evolve
/// POST /business-insights  -> business_insights
/// POST /roast              -> roast
/// POST /research           -> research
/// POST /ai-debate          -> debate
/// POST /idea-mixer         -> mix
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(ideas::analyze))
        .route("/evolve", post(ideas::evolve))
        .route("/business-insights", post(ideas::business_insights))
        .route("/roast", post(ideas::roast))
        .route("/research", post(ideas::research))
        .route("/ai-debate", post(ideas::debate))
        .route("/idea-mixer", post(ideas::mix))
}
