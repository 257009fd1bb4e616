//! Posts and comments. Only the author may delete what they wrote.

use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::posts::{self as posts_repo, Author, Comment, Post};
use crate::repos::users::UserRepo;
use crate::validation::FieldChecks;

/// Body for both new posts and new comments.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommentView {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostView {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MsgResponse {
    pub msg: String,
}

impl From<Comment> for CommentView {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            user: c.user_id,
            text: c.text,
            name: c.name,
            avatar: c.avatar,
            date: c.created_at,
        }
    }
}

impl From<Post> for PostView {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            user: p.user_id,
            text: p.text,
            name: p.name,
            avatar: p.avatar,
            date: p.created_at,
            comments: p.comments.into_iter().map(CommentView::from).collect(),
        }
    }
}

fn post_not_found() -> AppError {
    AppError::not_found(ErrorCode::PostNotFound, "Post not found")
}

fn comment_not_found() -> AppError {
    AppError::not_found(ErrorCode::CommentNotFound, "Comment does not exist")
}

fn parse_post_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| post_not_found())
}

fn validate_text(req: &TextRequest) -> Result<(), AppError> {
    FieldChecks::new()
        .required("text", &req.text, "Text is required")
        .finish()
}

/// Snapshot the caller's current name and avatar.
async fn author_of(users: &dyn UserRepo, user_id: Uuid) -> Result<Author, AppError> {
    let identity = users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "User not found"))?;

    Ok(Author {
        user_id: identity.id,
        name: identity.name,
        avatar: identity.avatar_url,
    })
}

pub async fn create_post(
    db: &DatabaseConnection,
    users: &dyn UserRepo,
    user_id: Uuid,
    req: TextRequest,
) -> Result<PostView, AppError> {
    validate_text(&req)?;
    let author = author_of(users, user_id).await?;

    let post = posts_repo::create_post(db, author, req.text).await?;
    info!(user_id = %user_id, post_id = %post.id, "post created");

    Ok(PostView::from(post))
}

pub async fn list_posts(db: &DatabaseConnection) -> Result<Vec<PostView>, AppError> {
    let posts = posts_repo::find_all(db).await?;
    Ok(posts.into_iter().map(PostView::from).collect())
}

pub async fn get_post(db: &DatabaseConnection, raw_post_id: &str) -> Result<PostView, AppError> {
    let post_id = parse_post_id(raw_post_id)?;
    let post = posts_repo::require_post(db, post_id).await?;
    Ok(PostView::from(post))
}

/// Delete a post the caller wrote, along with its comments.
pub async fn delete_post(
    db: &DatabaseConnection,
    user_id: Uuid,
    raw_post_id: &str,
) -> Result<MsgResponse, AppError> {
    let post_id = parse_post_id(raw_post_id)?;

    let txn = db.begin().await?;
    let post = posts_repo::require_post(&txn, post_id).await?;

    if post.user_id != user_id {
        info!(user_id = %user_id, post_id = %post_id, "post delete refused: not the author");
        return Err(AppError::unauthorized_not_owner());
    }

    posts_repo::delete_post(&txn, post_id).await?;
    txn.commit().await?;
    info!(user_id = %user_id, post_id = %post_id, "post removed");

    Ok(MsgResponse {
        msg: "Post removed".to_string(),
    })
}

/// Add a comment and return the post's comments, newest first.
pub async fn add_comment(
    db: &DatabaseConnection,
    users: &dyn UserRepo,
    user_id: Uuid,
    raw_post_id: &str,
    req: TextRequest,
) -> Result<Vec<CommentView>, AppError> {
    validate_text(&req)?;
    let post_id = parse_post_id(raw_post_id)?;

    posts_repo::require_post(db, post_id).await?;

    let author = author_of(users, user_id).await?;
    posts_repo::add_comment(db, post_id, author, req.text).await?;

    let comments = posts_repo::find_comments(db, post_id).await?;
    Ok(comments.into_iter().map(CommentView::from).collect())
}

/// Delete a comment the caller wrote and return the remaining comments.
pub async fn delete_comment(
    db: &DatabaseConnection,
    user_id: Uuid,
    raw_post_id: &str,
    raw_comment_id: &str,
) -> Result<Vec<CommentView>, AppError> {
    let post_id = parse_post_id(raw_post_id)?;

    let txn = db.begin().await?;
    posts_repo::require_post(&txn, post_id).await?;

    let comment_id = Uuid::parse_str(raw_comment_id).map_err(|_| comment_not_found())?;
    let comment = posts_repo::find_comment(&txn, post_id, comment_id)
        .await?
        .ok_or_else(comment_not_found)?;

    if comment.user_id != user_id {
        info!(user_id = %user_id, comment_id = %comment_id, "comment delete refused: not the author");
        return Err(AppError::unauthorized_not_owner());
    }

    posts_repo::delete_comment(&txn, comment_id).await?;
    let remaining = posts_repo::find_comments(&txn, post_id).await?;
    txn.commit().await?;

    Ok(remaining.into_iter().map(CommentView::from).collect())
}
