//! Idea repository models and DTOs.

use ideaforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `repos` table.
#[derive(Debug, Clone, FromRow)]
pub struct IdeaRepo {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub owner_id: DbId,
    pub visibility: String,
    pub content: serde_json::Value,
    pub forked_from: Option<DbId>,
    pub forks: Vec<DbId>,
    pub tags: Vec<String>,
    pub category: String,
    pub star_count: i32,
    pub fork_count: i32,
    pub view_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A repository row joined with its owner's public columns.
///
/// Flat because `sqlx::query_as` maps by column name; the owner columns
/// are aliased `owner_*` in the queries.
#[derive(Debug, Clone, FromRow)]
pub struct RepoWithOwner {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub owner_id: DbId,
    pub visibility: String,
    pub content: serde_json::Value,
    pub forked_from: Option<DbId>,
    pub forks: Vec<DbId>,
    pub tags: Vec<String>,
    pub category: String,
    pub star_count: i32,
    pub fork_count: i32,
    pub view_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_image: Option<String>,
    pub owner_bio: String,
    pub owner_location: String,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads and query parameters)
// ---------------------------------------------------------------------------

/// Request body for `POST /api/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRepo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub visibility: Option<String>,
    pub content: Option<serde_json::Value>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
}

/// Request body for `PUT /api/repos/{id}`. Every field is an optional
/// patch; empty strings and empty lists are normalized to "not provided"
/// before this reaches the database.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRepo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<String>,
    pub content: Option<serde_json::Value>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
}

/// Query parameters for `GET /api/repos`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoListParams {
    pub user_id: Option<DbId>,
    pub visibility: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Owner summary embedded in repository responses.
///
/// `bio` and `location` are only populated on single-repo reads, matching
/// the wider owner expansion there.
#[derive(Debug, Clone, Serialize)]
pub struct RepoOwner {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Fork-parent summary embedded in repository responses.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ForkParent {
    pub id: DbId,
    pub name: String,
    pub owner: DbId,
}

/// Full repository representation returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoResponse {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub owner: RepoOwner,
    pub visibility: String,
    pub content: serde_json::Value,
    pub forked_from: Option<ForkParent>,
    pub forks: Vec<DbId>,
    pub stars: Vec<DbId>,
    pub tags: Vec<String>,
    pub category: String,
    pub star_count: i32,
    pub fork_count: i32,
    pub view_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RepoResponse {
    /// Assemble the wire representation from a joined row plus the
    /// separately-fetched star set and optional fork parent.
    ///
    /// `detail` controls whether the owner's bio/location are included
    /// (single-repo reads) or omitted (listings, create, update).
    pub fn assemble(
        row: RepoWithOwner,
        stars: Vec<DbId>,
        forked_from: Option<ForkParent>,
        detail: bool,
    ) -> Self {
        let owner = RepoOwner {
            id: row.owner_id,
            name: row.owner_name,
            email: row.owner_email,
            image: row.owner_image,
            bio: detail.then_some(row.owner_bio),
            location: detail.then_some(row.owner_location),
        };
        RepoResponse {
            id: row.id,
            name: row.name,
            description: row.description,
            owner,
            visibility: row.visibility,
            content: row.content,
            forked_from,
            forks: row.forks,
            stars,
            tags: row.tags,
            category: row.category,
            star_count: row.star_count,
            fork_count: row.fork_count,
            view_count: row.view_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
