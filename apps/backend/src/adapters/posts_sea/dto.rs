//! DTOs for posts_sea adapter.

use uuid::Uuid;

/// DTO for creating a post. Name and avatar are snapshots of the author.
#[derive(Debug, Clone)]
pub struct PostCreate {
    pub user_id: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
}

/// DTO for creating a comment on a post.
#[derive(Debug, Clone)]
pub struct CommentCreate {
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
}
