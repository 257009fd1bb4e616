//! SeaORM adapter for profiles.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{profiles, users};

pub mod dto;

pub use dto::ProfileUpsert;

pub async fn find_by_user_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Option<profiles::Model>, sea_orm::DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn find_by_user_id_with_owner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<Option<(profiles::Model, Option<users::Model>)>, sea_orm::DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::UserId.eq(user_id))
        .find_also_related(users::Entity)
        .one(conn)
        .await
}

pub async fn find_all_with_owner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<(profiles::Model, Option<users::Model>)>, sea_orm::DbErr> {
    profiles::Entity::find()
        .find_also_related(users::Entity)
        .order_by_asc(profiles::Column::CreatedAt)
        .all(conn)
        .await
}

/// Insert the profile for `user_id`, or overwrite the existing one.
pub async fn upsert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    dto: ProfileUpsert,
) -> Result<profiles::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    match find_by_user_id(conn, user_id).await? {
        Some(existing) => {
            let mut active: profiles::ActiveModel = existing.into();
            active.company = Set(dto.company);
            active.website = Set(dto.website);
            active.location = Set(dto.location);
            active.status = Set(dto.status);
            active.skills = Set(dto.skills);
            active.bio = Set(dto.bio);
            active.github_username = Set(dto.github_username);
            active.updated_at = Set(now);
            active.update(conn).await
        }
        None => {
            let active = profiles::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                company: Set(dto.company),
                website: Set(dto.website),
                location: Set(dto.location),
                status: Set(dto.status),
                skills: Set(dto.skills),
                bio: Set(dto.bio),
                github_username: Set(dto.github_username),
                created_at: Set(now),
                updated_at: Set(now),
            };
            active.insert(conn).await
        }
    }
}
