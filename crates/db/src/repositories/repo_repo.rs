//! Repository for the `repos` and `repo_stars` tables.
//!
//! Provides repo CRUD, the visibility-filtered listing, the view-count
//! read side effect, the star toggle, and forking. Counter maintenance
//! uses atomic SQL updates so concurrent toggles cannot lose updates.

use ideaforge_core::repo::{ListFilter, SortOrder, MAX_LIST_LIMIT};
use ideaforge_core::types::DbId;
use sqlx::PgPool;

use crate::models::repo::{ForkParent, IdeaRepo, RepoWithOwner, UpdateRepo};

/// Column list for `repos` queries.
const REPO_COLUMNS: &str = "\
    id, name, description, owner_id, visibility, content, forked_from, \
    forks, tags, category, star_count, fork_count, view_count, \
    created_at, updated_at";

/// Column list for owner-joined queries (`repos r JOIN users u`).
const JOINED_COLUMNS: &str = "\
    r.id, r.name, r.description, r.owner_id, r.visibility, r.content, \
    r.forked_from, r.forks, r.tags, r.category, r.star_count, \
    r.fork_count, r.view_count, r.created_at, r.updated_at, \
    u.name AS owner_name, u.email AS owner_email, u.image AS owner_image, \
    u.bio AS owner_bio, u.location AS owner_location";

/// Fields copied from the source repo when forking; everything else
/// (counters, stars, forks) starts fresh on the child.
pub struct NewRepo<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub visibility: &'a str,
    pub content: &'a serde_json::Value,
    pub tags: &'a [String],
    pub category: &'a str,
}

/// Provides CRUD and social operations for idea repositories.
pub struct RepoRepo;

impl RepoRepo {
    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Insert a new repository owned by `owner_id`, returning the row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &NewRepo<'_>,
    ) -> Result<IdeaRepo, sqlx::Error> {
        let query = format!(
            "INSERT INTO repos (name, description, owner_id, visibility, content, tags, category)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {REPO_COLUMNS}"
        );
        sqlx::query_as::<_, IdeaRepo>(&query)
            .bind(input.name)
            .bind(input.description)
            .bind(owner_id)
            .bind(input.visibility)
            .bind(input.content)
            .bind(input.tags)
            .bind(input.category)
            .fetch_one(pool)
            .await
    }

    /// Find a repository row by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<IdeaRepo>, sqlx::Error> {
        let query = format!("SELECT {REPO_COLUMNS} FROM repos WHERE id = $1");
        sqlx::query_as::<_, IdeaRepo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a repository with its owner columns joined in.
    pub async fn find_with_owner(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RepoWithOwner>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM repos r JOIN users u ON u.id = r.owner_id \
             WHERE r.id = $1"
        );
        sqlx::query_as::<_, RepoWithOwner>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List repositories under the composed access filter.
    ///
    /// `sort_column` must come from [`ideaforge_core::repo::sort_column`]
    /// (an allowlist), never from raw caller input. Results are capped at
    /// [`MAX_LIST_LIMIT`].
    pub async fn list(
        pool: &PgPool,
        filter: &ListFilter,
        sort_column: &'static str,
        order: SortOrder,
    ) -> Result<Vec<RepoWithOwner>, sqlx::Error> {
        // NULL parameters disable the corresponding predicate, so one
        // statement covers all filter combinations.
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM repos r JOIN users u ON u.id = r.owner_id \
             WHERE ($1::BIGINT IS NULL OR r.owner_id = $1) \
               AND ($2::TEXT IS NULL OR r.visibility = $2) \
             ORDER BY r.{sort_column} {} \
             LIMIT $3",
            order.as_sql()
        );
        sqlx::query_as::<_, RepoWithOwner>(&query)
            .bind(filter.owner)
            .bind(filter.visibility.map(|v| v.as_str()))
            .bind(MAX_LIST_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Record a successful read: atomically bump `view_count` by 1 and
    /// return the new value.
    pub async fn increment_view_count(pool: &PgPool, id: DbId) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE repos SET view_count = view_count + 1 WHERE id = $1 RETURNING view_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Apply a partial patch. `None` fields keep their stored value.
    ///
    /// Returns `None` if no repository with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &UpdateRepo,
    ) -> Result<Option<IdeaRepo>, sqlx::Error> {
        let query = format!(
            "UPDATE repos SET
                 name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 visibility = COALESCE($4, visibility),
                 content = COALESCE($5, content),
                 tags = COALESCE($6, tags),
                 category = COALESCE($7, category),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {REPO_COLUMNS}"
        );
        sqlx::query_as::<_, IdeaRepo>(&query)
            .bind(id)
            .bind(&patch.name)
            .bind(&patch.description)
            .bind(&patch.visibility)
            .bind(&patch.content)
            .bind(&patch.tags)
            .bind(&patch.category)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a repository. Its star rows cascade away with it;
    /// `forked_from` pointers in other rows are deliberately left alone.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM repos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Stars
    // -----------------------------------------------------------------------

    /// Toggle `user_id`'s star on a repository.
    ///
    /// Membership and counter move together in one transaction: the insert
    /// uses `ON CONFLICT DO NOTHING` so the row's presence decides the
    /// direction, and the counter update is atomic with a floor of 0.
    /// Returns `(starred_now, star_count)`.
    pub async fn toggle_star(
        pool: &PgPool,
        repo_id: DbId,
        user_id: DbId,
    ) -> Result<(bool, i32), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO repo_stars (repo_id, user_id) VALUES ($1, $2) \
             ON CONFLICT (repo_id, user_id) DO NOTHING",
        )
        .bind(repo_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        let star_count: i32 = if inserted {
            sqlx::query_scalar(
                "UPDATE repos SET star_count = star_count + 1 WHERE id = $1 \
                 RETURNING star_count",
            )
            .bind(repo_id)
            .fetch_one(&mut *tx)
            .await?
        } else {
            sqlx::query("DELETE FROM repo_stars WHERE repo_id = $1 AND user_id = $2")
                .bind(repo_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            sqlx::query_scalar(
                "UPDATE repos SET star_count = GREATEST(star_count - 1, 0) WHERE id = $1 \
                 RETURNING star_count",
            )
            .bind(repo_id)
            .fetch_one(&mut *tx)
            .await?
        };

        tx.commit().await?;
        Ok((inserted, star_count))
    }

    /// List the identities that starred a repository, oldest star first.
    pub async fn star_user_ids(pool: &PgPool, repo_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT user_id FROM repo_stars WHERE repo_id = $1 ORDER BY created_at",
        )
        .bind(repo_id)
        .fetch_all(pool)
        .await
    }

    /// Fetch `(repo_id, user_id)` star pairs for a batch of repositories,
    /// for assembling list responses in one round trip.
    pub async fn stars_for_repos(
        pool: &PgPool,
        repo_ids: &[DbId],
    ) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, DbId)>(
            "SELECT repo_id, user_id FROM repo_stars WHERE repo_id = ANY($1) \
             ORDER BY created_at",
        )
        .bind(repo_ids)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Forks
    // -----------------------------------------------------------------------

    /// Fork `source` for `new_owner`: insert the child copy and update the
    /// parent's fork counter and child list in one transaction.
    ///
    /// The child is always public and records its lineage in
    /// `forked_from`. Access checks (public source, non-owner caller)
    /// belong to the handler.
    pub async fn fork(
        pool: &PgPool,
        source: &IdeaRepo,
        new_owner: DbId,
    ) -> Result<IdeaRepo, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO repos (name, description, owner_id, visibility, content, \
                                forked_from, tags, category)
             VALUES ($1, $2, $3, 'public', $4, $5, $6, $7)
             RETURNING {REPO_COLUMNS}"
        );
        let child = sqlx::query_as::<_, IdeaRepo>(&insert)
            .bind(&source.name)
            .bind(&source.description)
            .bind(new_owner)
            .bind(&source.content)
            .bind(source.id)
            .bind(&source.tags)
            .bind(&source.category)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE repos SET fork_count = fork_count + 1, \
                              forks = array_append(forks, $2), \
                              updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(source.id)
        .bind(child.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(child)
    }

    /// Fork-parent summary for response expansion. Returns `None` when the
    /// parent has been deleted (dangling `forked_from` pointer).
    pub async fn fork_parent(
        pool: &PgPool,
        parent_id: DbId,
    ) -> Result<Option<ForkParent>, sqlx::Error> {
        sqlx::query_as::<_, ForkParent>(
            "SELECT id, name, owner_id AS owner FROM repos WHERE id = $1",
        )
        .bind(parent_id)
        .fetch_optional(pool)
        .await
    }
}
