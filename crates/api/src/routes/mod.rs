pub mod auth;
pub mod health;
pub mod ideas;
pub mod repos;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                  register (public)
/// /auth/login                     login (public)
/// /auth/me                        current profile (requires auth)
///
/// /repos                          list (public), create (requires auth)
/// /repos/{id}                     get (public), update/delete (owner)
/// /repos/{id}/star                toggle star (requires auth)
/// /repos/{id}/fork                fork (requires auth)
///
/// /analyze                        idea analysis (public)
/// /evolve                         idea variants (public)
/// /business-insights              business analysis (public)
/// /roast                          idea roast (public)
/// /research                       paper suggestions (public)
/// /ai-debate                      optimist/skeptic debate (public)
/// /idea-mixer                     idea hybridization (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/repos", repos::router())
        .merge(ideas::router())
}
