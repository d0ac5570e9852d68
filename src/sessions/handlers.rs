use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::extractors::SessionId;
use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub id: Uuid,
}

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/sessions", post(open_session).delete(close_session))
}

#[instrument(skip(state))]
pub async fn open_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionCreated>), AppError> {
    let id = super::services::open_session(&state).await?;
    let open = state.sessions.len().await;
    info!(session_id = %id, open, "session opened");
    Ok((StatusCode::CREATED, Json(SessionCreated { id })))
}

#[instrument(skip(state))]
pub async fn close_session(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<StatusCode, AppError> {
    if !state.sessions.close(session_id).await {
        return Err(AppError::UnknownSession);
    }
    crate::images::services::purge_session_images(&state, session_id).await;
    info!(%session_id, "session closed");
    Ok(StatusCode::NO_CONTENT)
}
