//! Route definitions for the `/repos` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::repos;
use crate::state::AppState;

/// Repository routes mounted at `/repos`.
///
/// ```text
/// GET    /            -> list_repos
/// POST   /            -> create_repo
/// GET    /{id}        -> get_repo
/// PUT    /{id}        -> update_repo
/// DELETE /{id}        -> delete_repo
/// POST   /{id}/star   -> toggle_star
/// POST   /{id}/fork   -> fork_repo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(repos::list_repos).post(repos::create_repo))
        .route(
            "/{id}",
            get(repos::get_repo)
                .put(repos::update_repo)
                .delete(repos::delete_repo),
        )
        .route("/{id}/star", post(repos::toggle_star))
        .route("/{id}/fork", post(repos::fork_repo))
}
