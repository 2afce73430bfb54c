//! Community feed: posts, comments and likes.
//!
//! A deliberately small record store. Posts own their comments; likes are
//! a plain counter with no per-user deduplication. User existence is
//! checked by the HTTP layer against the [`super::UserDirectory`] before
//! anything is written here.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::ids::IdSequence;
use super::{CommentId, PostId, UserId};
use crate::error::GatewayError;

/// A comment under a post.
#[derive(Debug, Clone)]
pub struct Comment {
    /// Unique comment identifier (one sequence across all posts).
    pub comment_id: CommentId,
    /// Post the comment belongs to.
    pub post_id: PostId,
    /// Author of the comment.
    pub user_id: UserId,
    /// Comment text, trimmed.
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
struct Post {
    post_id: PostId,
    user_id: UserId,
    content: String,
    image_url: Option<String>,
    likes: u64,
    created_at: DateTime<Utc>,
    comments: Vec<Comment>,
}

/// Point-in-time view of a post, without its comments.
#[derive(Debug, Clone)]
pub struct PostSnapshot {
    /// Post identifier.
    pub post_id: PostId,
    /// Author of the post.
    pub user_id: UserId,
    /// Post body, trimmed.
    pub content: String,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Number of likes received.
    pub likes: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostSnapshot {
    fn from(post: &Post) -> Self {
        Self {
            post_id: post.post_id,
            user_id: post.user_id,
            content: post.content.clone(),
            image_url: post.image_url.clone(),
            likes: post.likes,
            created_at: post.created_at,
        }
    }
}

/// Store of all community posts.
///
/// One lock guards the whole board; the feed is read, sorted and sliced
/// under it, then released before serialization.
#[derive(Debug, Default)]
pub struct CommunityBoard {
    posts: RwLock<HashMap<PostId, Post>>,
    post_sequence: IdSequence,
    comment_sequence: IdSequence,
}

impl CommunityBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a post and returns its snapshot.
    pub async fn create_post(
        &self,
        user_id: UserId,
        content: &str,
        image_url: Option<String>,
    ) -> PostSnapshot {
        let post_id = PostId::new(self.post_sequence.next_value());
        let post = Post {
            post_id,
            user_id,
            content: content.trim().to_string(),
            image_url,
            likes: 0,
            created_at: Utc::now(),
            comments: Vec::new(),
        };
        let snapshot = PostSnapshot::from(&post);
        self.posts.write().await.insert(post_id, post);
        snapshot
    }

    /// Returns one page of the feed, newest posts first (ties break by
    /// id, newest first).
    pub async fn feed(&self, limit: usize, offset: usize) -> Vec<PostSnapshot> {
        let map = self.posts.read().await;
        let mut snapshots: Vec<PostSnapshot> = map.values().map(PostSnapshot::from).collect();
        drop(map);
        snapshots.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.post_id.cmp(&a.post_id))
        });
        snapshots.into_iter().skip(offset).take(limit).collect()
    }

    /// Adds a comment to a post and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PostNotFound`] if the post does not exist.
    pub async fn add_comment(
        &self,
        post_id: PostId,
        user_id: UserId,
        text: &str,
    ) -> Result<Comment, GatewayError> {
        let mut map = self.posts.write().await;
        let post = map
            .get_mut(&post_id)
            .ok_or(GatewayError::PostNotFound(post_id))?;
        let comment = Comment {
            comment_id: CommentId::new(self.comment_sequence.next_value()),
            post_id,
            user_id,
            text: text.trim().to_string(),
            created_at: Utc::now(),
        };
        post.comments.push(comment.clone());
        Ok(comment)
    }

    /// Returns the comments of a post in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PostNotFound`] if the post does not exist.
    pub async fn comments(&self, post_id: PostId) -> Result<Vec<Comment>, GatewayError> {
        let map = self.posts.read().await;
        map.get(&post_id)
            .map(|post| post.comments.clone())
            .ok_or(GatewayError::PostNotFound(post_id))
    }

    /// Increments the like counter of a post and returns the updated
    /// snapshot. Likes are not deduplicated per user.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PostNotFound`] if the post does not exist.
    pub async fn like(&self, post_id: PostId) -> Result<PostSnapshot, GatewayError> {
        let mut map = self.posts.write().await;
        let post = map
            .get_mut(&post_id)
            .ok_or(GatewayError::PostNotFound(post_id))?;
        post.likes = post.likes.saturating_add(1);
        Ok(PostSnapshot::from(&*post))
    }

    /// Returns `true` if a post with this id exists.
    pub async fn contains(&self, post_id: PostId) -> bool {
        self.posts.read().await.contains_key(&post_id)
    }

    /// Returns the number of posts on the board.
    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    /// Returns `true` if the board has no posts.
    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}
