//! SeaORM adapter for posts and their comments.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{post_comments, posts};

pub mod dto;

pub use dto::{CommentCreate, PostCreate};

pub async fn create_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PostCreate,
) -> Result<posts::Model, sea_orm::DbErr> {
    let post_active = posts::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(dto.user_id),
        text: Set(dto.text),
        name: Set(dto.name),
        avatar: Set(dto.avatar),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    post_active.insert(conn).await
}

/// All posts, newest first.
pub async fn find_all_posts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<posts::Model>, sea_orm::DbErr> {
    posts::Entity::find()
        .order_by_desc(posts::Column::CreatedAt)
        .all(conn)
        .await
}

pub async fn find_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: Uuid,
) -> Result<Option<posts::Model>, sea_orm::DbErr> {
    posts::Entity::find_by_id(post_id).one(conn).await
}

/// Delete a post and its comments. Returns the number of posts removed.
pub async fn delete_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    post_comments::Entity::delete_many()
        .filter(post_comments::Column::PostId.eq(post_id))
        .exec(conn)
        .await?;

    let result = posts::Entity::delete_by_id(post_id).exec(conn).await?;
    Ok(result.rows_affected)
}

/// Comments for the given posts, newest first.
pub async fn find_comments_for_posts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_ids: &[Uuid],
) -> Result<Vec<post_comments::Model>, sea_orm::DbErr> {
    if post_ids.is_empty() {
        return Ok(Vec::new());
    }

    post_comments::Entity::find()
        .filter(post_comments::Column::PostId.is_in(post_ids.iter().copied()))
        .order_by_desc(post_comments::Column::CreatedAt)
        .all(conn)
        .await
}

pub async fn create_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CommentCreate,
) -> Result<post_comments::Model, sea_orm::DbErr> {
    let comment_active = post_comments::ActiveModel {
        id: Set(Uuid::new_v4()),
        post_id: Set(dto.post_id),
        user_id: Set(dto.user_id),
        text: Set(dto.text),
        name: Set(dto.name),
        avatar: Set(dto.avatar),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    comment_active.insert(conn).await
}

pub async fn find_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<post_comments::Model>, sea_orm::DbErr> {
    post_comments::Entity::find_by_id(comment_id)
        .filter(post_comments::Column::PostId.eq(post_id))
        .one(conn)
        .await
}

pub async fn delete_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    comment_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let result = post_comments::Entity::delete_by_id(comment_id)
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
