//! Handlers for the `/repos` resource: CRUD, star toggle, and fork.
//!
//! Reads are open to anonymous callers (private repos excepted); every
//! mutation requires authentication and, except star/fork, ownership.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ideaforge_core::error::CoreError;
use ideaforge_core::repo::{self, ListFilter, SortOrder, Visibility};
use ideaforge_core::types::DbId;
use ideaforge_db::models::repo::{
    CreateRepo, ForkParent, RepoListParams, RepoResponse, RepoWithOwner, UpdateRepo,
};
use ideaforge_db::repositories::repo_repo::NewRepo;
use ideaforge_db::repositories::RepoRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ReposResponse {
    repos: Vec<RepoResponse>,
}

#[derive(Debug, Serialize)]
struct RepoEnvelope {
    repo: RepoResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StarResponse {
    starred: bool,
    star_count: i32,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

// ---------------------------------------------------------------------------
// Listing and reads
// ---------------------------------------------------------------------------

/// GET /api/repos
///
/// List repositories. The visibility filter composes with the caller's
/// identity: only an owner sees their own private repos.
pub async fn list_repos(
    maybe_auth: MaybeAuthUser,
    State(state): State<AppState>,
    Query(params): Query<RepoListParams>,
) -> AppResult<impl IntoResponse> {
    let requested = match params.visibility.as_deref() {
        Some(raw) => Some(Visibility::parse(raw).map_err(AppError::Core)?),
        None => None,
    };
    let filter = ListFilter::compose(maybe_auth.user_id(), params.user_id, requested);
    let sort = repo::sort_column(params.sort.as_deref());
    let order = SortOrder::from_param(params.order.as_deref());

    let rows = RepoRepo::list(&state.pool, &filter, sort, order).await?;

    // One round trip for all star sets instead of one per repo.
    let ids: Vec<DbId> = rows.iter().map(|row| row.id).collect();
    let mut stars_by_repo: HashMap<DbId, Vec<DbId>> = HashMap::new();
    for (repo_id, user_id) in RepoRepo::stars_for_repos(&state.pool, &ids).await? {
        stars_by_repo.entry(repo_id).or_default().push(user_id);
    }

    let repos = rows
        .into_iter()
        .map(|row| {
            let stars = stars_by_repo.remove(&row.id).unwrap_or_default();
            RepoResponse::assemble(row, stars, None, false)
        })
        .collect();

    Ok(Json(ReposResponse { repos }))
}

/// GET /api/repos/{id}
///
/// Read one repository. Incrementing the view count is an unconditional
/// side effect of a successful read, the owner's own views included.
pub async fn get_repo(
    maybe_auth: MaybeAuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mut row = RepoRepo::find_with_owner(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Repository",
            id,
        }))?;

    if row.visibility == Visibility::Private.as_str()
        && maybe_auth.user_id() != Some(row.owner_id)
    {
        return Err(AppError::Core(CoreError::Forbidden("Access denied".into())));
    }

    // Persist the increment before answering so the response reflects it.
    row.view_count = RepoRepo::increment_view_count(&state.pool, id).await?;

    let stars = RepoRepo::star_user_ids(&state.pool, id).await?;
    let forked_from = match row.forked_from {
        Some(parent_id) => RepoRepo::fork_parent(&state.pool, parent_id).await?,
        None => None,
    };

    Ok(Json(RepoEnvelope {
        repo: RepoResponse::assemble(row, stars, forked_from, true),
    }))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /api/repos
///
/// Create a repository owned by the caller.
pub async fn create_repo(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRepo>,
) -> AppResult<impl IntoResponse> {
    repo::validate_new_repo(&input.name, &input.description).map_err(AppError::Core)?;

    let visibility = match repo::non_empty(input.visibility) {
        Some(raw) => Visibility::parse(&raw).map_err(AppError::Core)?,
        None => Visibility::Public,
    };
    let content = input.content.unwrap_or_else(|| serde_json::json!({}));
    let tags = input.tags.unwrap_or_default();
    let category = repo::non_empty(input.category).unwrap_or_else(|| "general".to_string());

    let created = RepoRepo::create(
        &state.pool,
        auth.user_id,
        &NewRepo {
            name: &input.name,
            description: &input.description,
            visibility: visibility.as_str(),
            content: &content,
            tags: &tags,
            category: &category,
        },
    )
    .await?;

    tracing::info!(repo_id = created.id, user_id = auth.user_id, "Repository created");

    let row = reload_with_owner(&state, created.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(RepoEnvelope {
            repo: RepoResponse::assemble(row, Vec::new(), None, false),
        }),
    ))
}

/// PUT /api/repos/{id}
///
/// Partial patch, owner only. Empty strings and empty lists count as
/// "not provided" and leave the stored value unchanged.
pub async fn update_repo(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRepo>,
) -> AppResult<impl IntoResponse> {
    let existing = RepoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Repository",
            id,
        }))?;

    if existing.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden("Access denied".into())));
    }

    let visibility = match repo::non_empty(input.visibility) {
        Some(raw) => Some(Visibility::parse(&raw).map_err(AppError::Core)?.as_str().to_string()),
        None => None,
    };
    let patch = UpdateRepo {
        name: repo::non_empty(input.name),
        description: repo::non_empty(input.description),
        visibility,
        content: input.content,
        tags: repo::non_empty_list(input.tags),
        category: repo::non_empty(input.category),
    };

    RepoRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Repository",
            id,
        }))?;

    tracing::info!(repo_id = id, user_id = auth.user_id, "Repository updated");

    let row = reload_with_owner(&state, id).await?;
    let stars = RepoRepo::star_user_ids(&state.pool, id).await?;
    Ok(Json(RepoEnvelope {
        repo: RepoResponse::assemble(row, stars, None, false),
    }))
}

/// DELETE /api/repos/{id}
///
/// Hard delete, owner only. Fork back-references elsewhere are not
/// cleaned up.
pub async fn delete_repo(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let existing = RepoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Repository",
            id,
        }))?;

    if existing.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden("Access denied".into())));
    }

    RepoRepo::delete(&state.pool, id).await?;

    tracing::info!(repo_id = id, user_id = auth.user_id, "Repository deleted");

    Ok(Json(MessageResponse {
        message: "Repository deleted successfully".into(),
    }))
}

/// POST /api/repos/{id}/star
///
/// Toggle the caller's star. Its own inverse: starring twice restores
/// the original state and count.
pub async fn toggle_star(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    RepoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Repository",
            id,
        }))?;

    let (starred, star_count) = RepoRepo::toggle_star(&state.pool, id, auth.user_id).await?;

    tracing::info!(repo_id = id, user_id = auth.user_id, starred, "Star toggled");

    Ok(Json(StarResponse {
        starred,
        star_count,
    }))
}

/// POST /api/repos/{id}/fork
///
/// Copy a public repository owned by someone else. The fork is always
/// public and records its lineage; the source's fork counter and child
/// list are updated in the same transaction.
pub async fn fork_repo(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let source = RepoRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Repository",
            id,
        }))?;

    if source.visibility != Visibility::Public.as_str() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Can only fork public repositories".into(),
        )));
    }
    if source.owner_id == auth.user_id {
        return Err(AppError::BadRequest(
            "Cannot fork your own repository".into(),
        ));
    }

    let child = RepoRepo::fork(&state.pool, &source, auth.user_id).await?;

    tracing::info!(
        source_id = source.id,
        fork_id = child.id,
        user_id = auth.user_id,
        "Repository forked",
    );

    let row = reload_with_owner(&state, child.id).await?;
    let forked_from = Some(ForkParent {
        id: source.id,
        name: source.name.clone(),
        owner: source.owner_id,
    });

    Ok((
        StatusCode::CREATED,
        Json(RepoEnvelope {
            repo: RepoResponse::assemble(row, Vec::new(), forked_from, false),
        }),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reload a repo with its owner joined in after a write. The row was
/// just written, so absence means it was deleted underneath us.
async fn reload_with_owner(state: &AppState, id: DbId) -> Result<RepoWithOwner, AppError> {
    RepoRepo::find_with_owner(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Repository {id} disappeared after write")))
}
