use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{CommentThread, PostCommentRequest, Reactions};
use super::services::{post_comment, react, Reaction};
use crate::{
    error::AppError, recipes::repo_types::Comment, sessions::extractors::SessionId,
    state::AppState,
};

pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/:key/like", post(like))
        .route("/recipes/:key/dislike", post(dislike))
        .route("/recipes/:key/comments", get(list_comments).post(add_comment))
}

async fn apply(
    state: &AppState,
    session_id: uuid::Uuid,
    key: &str,
    reaction: Reaction,
) -> Result<Json<Reactions>, AppError> {
    let counts = state
        .sessions
        .write(session_id, |k| react(k, key, reaction))
        .await?;
    info!(%session_id, %key, ?reaction, likes = counts.likes, dislikes = counts.dislikes, "reaction recorded");
    Ok(Json(counts))
}

#[instrument(skip(state))]
pub async fn like(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(key): Path<String>,
) -> Result<Json<Reactions>, AppError> {
    apply(&state, session_id, &key, Reaction::Like).await
}

#[instrument(skip(state))]
pub async fn dislike(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(key): Path<String>,
) -> Result<Json<Reactions>, AppError> {
    apply(&state, session_id, &key, Reaction::Dislike).await
}

#[instrument(skip(state, body))]
pub async fn add_comment(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(key): Path<String>,
    Json(body): Json<PostCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let comment = state
        .sessions
        .write(session_id, |k| post_comment(k, &key, body.author, body.text))
        .await?;
    info!(%session_id, %key, author = %comment.author, "comment posted");
    Ok((StatusCode::CREATED, Json(comment)))
}

#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(key): Path<String>,
) -> Result<Json<CommentThread>, AppError> {
    let comments = state
        .sessions
        .read(session_id, |k| {
            let id = k.resolve(&key)?.id;
            Ok(k.comments(id).to_vec())
        })
        .await?;
    Ok(Json(CommentThread { comments }))
}
