//! Community feed DTOs: posts, comments, likes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Comment, CommentId, PostId, PostSnapshot, UserId};

/// Request body for `POST /community/posts`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostCreateRequest {
    /// Author of the post; must be a registered user.
    pub user_id: UserId,
    /// Post body; surrounding whitespace is trimmed.
    pub content: String,
    /// Optional image URL.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One post as returned by the feed and like endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct PostDto {
    /// Post identifier.
    pub post_id: PostId,
    /// Author of the post.
    pub user_id: UserId,
    /// Post body.
    pub content: String,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Number of likes received.
    pub likes: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<PostSnapshot> for PostDto {
    fn from(snapshot: PostSnapshot) -> Self {
        Self {
            post_id: snapshot.post_id,
            user_id: snapshot.user_id,
            content: snapshot.content,
            image_url: snapshot.image_url,
            likes: snapshot.likes,
            created_at: snapshot.created_at,
        }
    }
}

/// Request body for `POST /community/posts/:id/comments`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CommentCreateRequest {
    /// Author of the comment; must be a registered user.
    pub user_id: UserId,
    /// Comment text; surrounding whitespace is trimmed.
    pub text: String,
}

/// One comment as returned by the comment endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentDto {
    /// Comment identifier.
    pub comment_id: CommentId,
    /// Post the comment belongs to.
    pub post_id: PostId,
    /// Author of the comment.
    pub user_id: UserId,
    /// Comment text.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            comment_id: comment.comment_id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            text: comment.text,
            created_at: comment.created_at,
        }
    }
}

/// Query parameters for `POST /community/posts/:id/like`.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LikeParams {
    /// User pressing the like button; must be registered.
    pub user_id: UserId,
}
