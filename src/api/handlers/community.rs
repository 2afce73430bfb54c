//! Community endpoint handlers: posts, feed, comments and likes.
//!
//! Authors are validated against the user directory before the board is
//! touched; the board itself does not know about users.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    CommentCreateRequest, CommentDto, LikeParams, PageParams, PostCreateRequest, PostDto,
};
use crate::app_state::AppState;
use crate::domain::PostId;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /community/posts` — Publish a post.
///
/// # Errors
///
/// Returns [`GatewayError::UserNotFound`] when the author is not
/// registered.
#[utoipa::path(
    post,
    path = "/api/v1/community/posts",
    tag = "Community",
    summary = "Create a post",
    description = "Publishes a post on the community feed. Content is trimmed.",
    request_body = PostCreateRequest,
    responses(
        (status = 201, description = "Post published", body = PostDto),
        (status = 404, description = "Author not registered", body = ErrorResponse),
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Json(req): Json<PostCreateRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    if !state.users.contains(req.user_id).await {
        return Err(GatewayError::UserNotFound(req.user_id));
    }
    let snapshot = state
        .community
        .create_post(req.user_id, &req.content, req.image_url)
        .await;
    Ok((StatusCode::CREATED, Json(PostDto::from(snapshot))))
}

/// `GET /community/feed` — One page of the feed, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/community/feed",
    tag = "Community",
    summary = "Read the feed",
    description = "Returns posts in reverse chronological order. Defaults to a page of 20.",
    params(PageParams),
    responses(
        (status = 200, description = "Page of posts", body = Vec<PostDto>),
    )
)]
pub async fn feed(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    let (limit, offset) = params.resolve(20);
    let posts: Vec<PostDto> = state
        .community
        .feed(limit, offset)
        .await
        .into_iter()
        .map(PostDto::from)
        .collect();
    Json(posts)
}

/// `POST /community/posts/:post_id/comments` — Comment on a post.
///
/// # Errors
///
/// Returns [`GatewayError::PostNotFound`] for unknown posts, then
/// [`GatewayError::UserNotFound`] for unregistered authors.
#[utoipa::path(
    post,
    path = "/api/v1/community/posts/{post_id}/comments",
    tag = "Community",
    summary = "Add a comment",
    description = "Appends a comment to a post. Text is trimmed.",
    params(
        ("post_id" = u64, Path, description = "Post id"),
    ),
    request_body = CommentCreateRequest,
    responses(
        (status = 201, description = "Comment added", body = CommentDto),
        (status = 404, description = "Post or author not found", body = ErrorResponse),
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<CommentCreateRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let post_id = PostId::new(id);
    if !state.community.contains(post_id).await {
        return Err(GatewayError::PostNotFound(post_id));
    }
    if !state.users.contains(req.user_id).await {
        return Err(GatewayError::UserNotFound(req.user_id));
    }
    let comment = state
        .community
        .add_comment(post_id, req.user_id, &req.text)
        .await?;
    Ok((StatusCode::CREATED, Json(CommentDto::from(comment))))
}

/// `GET /community/posts/:post_id/comments` — List comments in order.
///
/// # Errors
///
/// Returns [`GatewayError::PostNotFound`] for unknown posts.
#[utoipa::path(
    get,
    path = "/api/v1/community/posts/{post_id}/comments",
    tag = "Community",
    summary = "List comments",
    description = "Returns the comments of a post in insertion order.",
    params(
        ("post_id" = u64, Path, description = "Post id"),
    ),
    responses(
        (status = 200, description = "Comments of the post", body = Vec<CommentDto>),
        (status = 404, description = "Post not found", body = ErrorResponse),
    )
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, GatewayError> {
    let comments = state.community.comments(PostId::new(id)).await?;
    let comments: Vec<CommentDto> = comments.into_iter().map(CommentDto::from).collect();
    Ok(Json(comments))
}

/// `POST /community/posts/:post_id/like` — Like a post.
///
/// Likes are a plain counter; the same user can like a post repeatedly.
///
/// # Errors
///
/// Returns [`GatewayError::PostNotFound`] for unknown posts, then
/// [`GatewayError::UserNotFound`] for unregistered users.
#[utoipa::path(
    post,
    path = "/api/v1/community/posts/{post_id}/like",
    tag = "Community",
    summary = "Like a post",
    description = "Increments the like counter of a post.",
    params(
        ("post_id" = u64, Path, description = "Post id"),
        LikeParams,
    ),
    responses(
        (status = 200, description = "Updated post", body = PostDto),
        (status = 404, description = "Post or user not found", body = ErrorResponse),
    )
)]
pub async fn like_post(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<LikeParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let post_id = PostId::new(id);
    if !state.community.contains(post_id).await {
        return Err(GatewayError::PostNotFound(post_id));
    }
    if !state.users.contains(params.user_id).await {
        return Err(GatewayError::UserNotFound(params.user_id));
    }
    let snapshot = state.community.like(post_id).await?;
    Ok(Json(PostDto::from(snapshot)))
}

/// Community routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/community/posts", post(create_post))
        .route("/community/feed", get(feed))
        .route(
            "/community/posts/{post_id}/comments",
            post(add_comment).get(list_comments),
        )
        .route("/community/posts/{post_id}/like", post(like_post))
}
