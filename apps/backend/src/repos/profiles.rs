//! Profile repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::profiles_sea as profiles_adapter;
use crate::entities::{profiles, users};
use crate::errors::domain::DomainError;

/// Profile domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Public name and avatar of a profile's owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Owner {
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileWithOwner {
    pub profile: Profile,
    pub owner: Option<Owner>,
}

/// Profile fields as submitted by the owner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
}

/// Split a comma-separated skill list, trimming entries and dropping empty ones.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn find_by_user_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Option<ProfileWithOwner>, DomainError> {
    let row = profiles_adapter::find_by_user_id_with_owner(conn, user_id).await?;
    Ok(row.map(ProfileWithOwner::from))
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<ProfileWithOwner>, DomainError> {
    let rows = profiles_adapter::find_all_with_owner(conn).await?;
    Ok(rows.into_iter().map(ProfileWithOwner::from).collect())
}

pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    fields: ProfileFields,
) -> Result<Profile, DomainError> {
    let dto = profiles_adapter::ProfileUpsert {
        company: fields.company,
        website: fields.website,
        location: fields.location,
        status: fields.status,
        skills: fields.skills.join(","),
        bio: fields.bio,
        github_username: fields.github_username,
    };
    let model = profiles_adapter::upsert(conn, user_id, dto).await?;
    Ok(Profile::from(model))
}

impl From<profiles::Model> for Profile {
    fn from(model: profiles::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            company: model.company,
            website: model.website,
            location: model.location,
            status: model.status,
            skills: parse_skills(&model.skills),
            bio: model.bio,
            github_username: model.github_username,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<(profiles::Model, Option<users::Model>)> for ProfileWithOwner {
    fn from((profile, user): (profiles::Model, Option<users::Model>)) -> Self {
        Self {
            profile: Profile::from(profile),
            owner: user.map(|u| Owner {
                name: u.name,
                avatar: u.avatar,
            }),
        }
    }
}
