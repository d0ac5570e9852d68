use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument};

use super::services::{attach_image, load_image, UploadItem};
use crate::{
    error::AppError, recipes::repo_types::ImageRef, sessions::extractors::SessionId,
    state::AppState,
};

pub fn image_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/recipes/:key/image", post(upload_image).get(get_image))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// POST /recipes/:key/image (multipart)
/// Field: `image` (or `file`); the first matching field wins.
#[instrument(skip(state, mp))]
pub async fn upload_image(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(key): Path<String>,
    mut mp: Multipart,
) -> Result<(StatusCode, Json<ImageRef>), AppError> {
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("malformed multipart: {}", e)))?
    {
        if !matches!(field.name(), Some("image") | Some("file")) {
            continue;
        }
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".into());
        let body = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("malformed multipart: {}", e)))?;

        let image = attach_image(
            &state,
            session_id,
            &key,
            UploadItem {
                body,
                content_type: &content_type,
            },
        )
        .await?;
        info!(%session_id, %key, image_key = %image.key, "image uploaded");
        return Ok((StatusCode::CREATED, Json(image)));
    }
    Err(AppError::bad_request("image field is required"))
}

#[instrument(skip(state))]
pub async fn get_image(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (body, content_type) = load_image(&state, session_id, &key).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], body))
}
