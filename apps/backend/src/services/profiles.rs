//! Developer profiles: one per identity, readable by anyone.

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, FieldError};
use crate::errors::ErrorCode;
use crate::repos::profiles::{self as profiles_repo, parse_skills, ProfileFields, ProfileWithOwner};
use crate::validation::FieldChecks;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    /// Comma-separated list, e.g. `"rust, sql"`
    pub skills: String,
    pub bio: Option<String>,
    #[serde(alias = "githubusername")]
    pub github_username: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileOwnerView {
    pub id: Uuid,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProfileView {
    pub id: Uuid,
    pub user: ProfileOwnerView,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<ProfileWithOwner> for ProfileView {
    fn from(row: ProfileWithOwner) -> Self {
        let (name, avatar) = match row.owner {
            Some(owner) => (Some(owner.name), Some(owner.avatar)),
            None => (None, None),
        };
        let p = row.profile;
        Self {
            id: p.id,
            user: ProfileOwnerView {
                id: p.user_id,
                name,
                avatar,
            },
            company: p.company,
            website: p.website,
            location: p.location,
            status: p.status,
            skills: p.skills,
            bio: p.bio,
            github_username: p.github_username,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

fn profile_not_found() -> AppError {
    AppError::bad_request(ErrorCode::ProfileNotFound, "Profile not found")
}

/// Blank optional fields are treated as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_profile(req: &ProfileRequest) -> Result<(), AppError> {
    FieldChecks::new()
        .required("status", &req.status, "Status is required")
        .required("skills", &req.skills, "Skills is required")
        .finish()
}

pub async fn my_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<ProfileView, AppError> {
    profiles_repo::find_by_user_id(conn, user_id)
        .await?
        .map(ProfileView::from)
        .ok_or_else(|| {
            AppError::bad_request(ErrorCode::NoProfile, "There is no profile for this user")
        })
}

/// Create or replace the caller's profile.
pub async fn upsert_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    req: ProfileRequest,
) -> Result<ProfileView, AppError> {
    validate_profile(&req)?;

    let fields = ProfileFields {
        company: non_blank(req.company),
        website: non_blank(req.website),
        location: non_blank(req.location),
        status: req.status.trim().to_string(),
        skills: parse_skills(&req.skills),
        bio: non_blank(req.bio),
        github_username: non_blank(req.github_username),
    };

    if fields.skills.is_empty() {
        return Err(AppError::invalid(vec![FieldError::new(
            "skills",
            "Skills is required",
        )]));
    }

    profiles_repo::upsert(conn, user_id, fields).await?;
    info!(user_id = %user_id, "profile saved");

    my_profile(conn, user_id).await
}

pub async fn all_profiles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<ProfileView>, AppError> {
    let rows = profiles_repo::find_all(conn).await?;
    Ok(rows.into_iter().map(ProfileView::from).collect())
}

/// Public lookup by user id; unparsable ids read as "not found".
pub async fn profile_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    raw_user_id: &str,
) -> Result<ProfileView, AppError> {
    let user_id = Uuid::parse_str(raw_user_id).map_err(|_| profile_not_found())?;

    profiles_repo::find_by_user_id(conn, user_id)
        .await?
        .map(ProfileView::from)
        .ok_or_else(profile_not_found)
}
