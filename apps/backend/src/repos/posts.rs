//! Post and comment repository functions (generic over ConnectionTrait).

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::posts_sea as posts_adapter;
use crate::entities::{post_comments, posts};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Post domain model with its comments (newest first).
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub created_at: OffsetDateTime,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub created_at: OffsetDateTime,
}

/// Author snapshot copied onto posts and comments.
#[derive(Debug, Clone)]
pub struct Author {
    pub user_id: Uuid,
    pub name: String,
    pub avatar: String,
}

pub async fn create_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    author: Author,
    text: String,
) -> Result<Post, DomainError> {
    let dto = posts_adapter::PostCreate {
        user_id: author.user_id,
        text,
        name: author.name,
        avatar: author.avatar,
    };
    let model = posts_adapter::create_post(conn, dto).await?;
    Ok(Post::from_parts(model, Vec::new()))
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Post>, DomainError> {
    let models = posts_adapter::find_all_posts(conn).await?;
    let ids: Vec<Uuid> = models.iter().map(|p| p.id).collect();

    let mut by_post: HashMap<Uuid, Vec<Comment>> = HashMap::new();
    for comment in posts_adapter::find_comments_for_posts(conn, &ids).await? {
        by_post
            .entry(comment.post_id)
            .or_default()
            .push(Comment::from(comment));
    }

    Ok(models
        .into_iter()
        .map(|model| {
            let comments = by_post.remove(&model.id).unwrap_or_default();
            Post::from_parts(model, comments)
        })
        .collect())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: Uuid,
) -> Result<Option<Post>, DomainError> {
    let Some(model) = posts_adapter::find_post(conn, post_id).await? else {
        return Ok(None);
    };
    let comments = find_comments(conn, post_id).await?;
    Ok(Some(Post::from_parts(model, comments)))
}

/// Fetch a post or fail with `NotFound(Post)`.
pub async fn require_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: Uuid,
) -> Result<Post, DomainError> {
    find_by_id(conn, post_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Post, "Post not found"))
}

pub async fn delete_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: Uuid,
) -> Result<(), DomainError> {
    let removed = posts_adapter::delete_post(conn, post_id).await?;
    if removed == 0 {
        return Err(DomainError::not_found(NotFoundKind::Post, "Post not found"));
    }
    Ok(())
}

pub async fn find_comments<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: Uuid,
) -> Result<Vec<Comment>, DomainError> {
    let models = posts_adapter::find_comments_for_posts(conn, &[post_id]).await?;
    Ok(models.into_iter().map(Comment::from).collect())
}

pub async fn add_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: Uuid,
    author: Author,
    text: String,
) -> Result<Comment, DomainError> {
    let dto = posts_adapter::CommentCreate {
        post_id,
        user_id: author.user_id,
        text,
        name: author.name,
        avatar: author.avatar,
    };
    let model = posts_adapter::create_comment(conn, dto).await?;
    Ok(Comment::from(model))
}

pub async fn find_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: Uuid,
    comment_id: Uuid,
) -> Result<Option<Comment>, DomainError> {
    let model = posts_adapter::find_comment(conn, post_id, comment_id).await?;
    Ok(model.map(Comment::from))
}

pub async fn delete_comment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    comment_id: Uuid,
) -> Result<(), DomainError> {
    let removed = posts_adapter::delete_comment(conn, comment_id).await?;
    if removed == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Comment,
            "Comment does not exist",
        ));
    }
    Ok(())
}

impl Post {
    fn from_parts(model: posts::Model, comments: Vec<Comment>) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            text: model.text,
            name: model.name,
            avatar: model.avatar,
            created_at: model.created_at,
            comments,
        }
    }
}

impl From<post_comments::Model> for Comment {
    fn from(model: post_comments::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            text: model.text,
            name: model.name,
            avatar: model.avatar,
            created_at: model.created_at,
        }
    }
}
