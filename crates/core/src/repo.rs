//! Pure repository rules: visibility, list filtering, patch semantics,
//! and the sort-field allowlist.
//!
//! The db crate turns these into SQL; the api crate turns violations
//! into HTTP errors. Keeping the rules here makes them unit-testable
//! without a database.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Minimum idea length (in characters) accepted by the analyze mode.
pub const MIN_ANALYZE_IDEA_LEN: usize = 20;

/// Hard cap on list results. No pagination beyond this.
pub const MAX_LIST_LIMIT: i64 = 100;

/// Repository visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// Stable string form used in the database and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    /// Parse the wire/database form. Anything else is a validation error.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(CoreError::Validation(format!(
                "Invalid visibility '{other}'. Must be 'public' or 'private'"
            ))),
        }
    }
}

/// Effective filter for a repository listing, after access rules are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFilter {
    /// Restrict to repositories owned by this user.
    pub owner: Option<DbId>,
    /// Restrict to this visibility. `None` means no filter.
    pub visibility: Option<Visibility>,
}

impl ListFilter {
    /// Compose the effective filter from the raw query parameters and the
    /// caller's identity.
    ///
    /// - A target owner plus a different (or anonymous) caller forces
    ///   `public`, regardless of any requested visibility.
    /// - The owner listing their own repositories sees everything.
    /// - With no target owner, an explicit visibility is honored,
    ///   defaulting to public-only.
    pub fn compose(
        caller: Option<DbId>,
        target_owner: Option<DbId>,
        requested: Option<Visibility>,
    ) -> Self {
        match target_owner {
            Some(owner) if caller == Some(owner) => ListFilter {
                owner: Some(owner),
                visibility: None,
            },
            Some(owner) => ListFilter {
                owner: Some(owner),
                visibility: Some(Visibility::Public),
            },
            None => ListFilter {
                owner: None,
                visibility: Some(requested.unwrap_or(Visibility::Public)),
            },
        }
    }
}

/// Sort direction for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse the `order` query parameter. Only `"asc"` sorts ascending;
    /// everything else (including absence) is descending.
    pub fn from_param(order: Option<&str>) -> Self {
        match order {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Map a wire-format sort field to a column name.
///
/// Caller-controlled identifiers must never reach the query text, so
/// unknown fields degrade to `created_at` rather than erroring.
pub fn sort_column(field: Option<&str>) -> &'static str {
    match field {
        Some("name") => "name",
        Some("createdAt") => "created_at",
        Some("updatedAt") => "updated_at",
        Some("starCount") => "star_count",
        Some("forkCount") => "fork_count",
        Some("viewCount") => "view_count",
        _ => "created_at",
    }
}

/// Normalize an optional patch field: an empty string means "not provided"
/// and leaves the stored value unchanged.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Normalize an optional list patch field: an empty list means
/// "not provided", same as [`non_empty`] for strings.
pub fn non_empty_list(value: Option<Vec<String>>) -> Option<Vec<String>> {
    value.filter(|v| !v.is_empty())
}

/// Validate the required fields for creating a repository.
pub fn validate_new_repo(name: &str, description: &str) -> Result<(), CoreError> {
    if name.is_empty() || description.is_empty() {
        return Err(CoreError::Validation(
            "Name and description are required".into(),
        ));
    }
    Ok(())
}

/// Validate an idea for the analyze mode (length floor).
pub fn validate_analyze_idea(idea: &str) -> Result<(), CoreError> {
    if idea.chars().count() < MIN_ANALYZE_IDEA_LEN {
        return Err(CoreError::Validation("Idea too short for analysis".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_round_trips_through_strings() {
        assert_eq!(Visibility::parse("public").unwrap(), Visibility::Public);
        assert_eq!(Visibility::parse("private").unwrap(), Visibility::Private);
        assert_eq!(Visibility::Public.as_str(), "public");
        assert!(Visibility::parse("unlisted").is_err());
    }

    #[test]
    fn owner_listing_own_repos_sees_all_visibilities() {
        let filter = ListFilter::compose(Some(7), Some(7), Some(Visibility::Private));
        assert_eq!(filter.owner, Some(7));
        assert_eq!(filter.visibility, None);
    }

    #[test]
    fn other_callers_listing_a_user_are_forced_to_public() {
        // A different authenticated caller.
        let filter = ListFilter::compose(Some(3), Some(7), Some(Visibility::Private));
        assert_eq!(filter.owner, Some(7));
        assert_eq!(filter.visibility, Some(Visibility::Public));

        // An anonymous caller.
        let filter = ListFilter::compose(None, Some(7), None);
        assert_eq!(filter.visibility, Some(Visibility::Public));
    }

    #[test]
    fn global_listing_defaults_to_public_but_honors_explicit_visibility() {
        let filter = ListFilter::compose(Some(3), None, None);
        assert_eq!(filter.owner, None);
        assert_eq!(filter.visibility, Some(Visibility::Public));

        let filter = ListFilter::compose(None, None, Some(Visibility::Private));
        assert_eq!(filter.visibility, Some(Visibility::Private));
    }

    #[test]
    fn sort_fields_map_through_the_allowlist() {
        assert_eq!(sort_column(Some("starCount")), "star_count");
        assert_eq!(sort_column(Some("createdAt")), "created_at");
        assert_eq!(sort_column(Some("name")), "name");
        // Unknown or missing fields fall back to created_at.
        assert_eq!(sort_column(Some("owner; DROP TABLE repos")), "created_at");
        assert_eq!(sort_column(None), "created_at");
    }

    #[test]
    fn order_param_defaults_to_descending() {
        assert_eq!(SortOrder::from_param(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(Some("sideways")), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(None), SortOrder::Desc);
    }

    #[test]
    fn empty_patch_fields_are_treated_as_not_provided() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("kept".into())), Some("kept".into()));
        assert_eq!(non_empty(None), None);

        assert_eq!(non_empty_list(Some(vec![])), None);
        assert_eq!(
            non_empty_list(Some(vec!["a".into()])),
            Some(vec!["a".into()])
        );
    }

    #[test]
    fn analyze_idea_length_boundary_is_twenty() {
        let nineteen = "a".repeat(19);
        let twenty = "a".repeat(20);
        assert!(validate_analyze_idea(&nineteen).is_err());
        assert!(validate_analyze_idea(&twenty).is_ok());
    }

    #[test]
    fn new_repo_requires_name_and_description() {
        assert!(validate_new_repo("", "desc").is_err());
        assert!(validate_new_repo("name", "").is_err());
        assert!(validate_new_repo("name", "desc").is_ok());
    }
}
