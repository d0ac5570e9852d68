use anyhow::Context;
use bytes::Bytes;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::recipes::repo_types::{ImageRef, RecipeId};
use crate::state::AppState;
use crate::storage::fetch_required;

pub struct UploadItem<'a> {
    pub body: Bytes,
    pub content_type: &'a str,
}

fn session_prefix(session_id: Uuid) -> String {
    format!("recipes/{}/", session_id)
}

fn object_key(session_id: Uuid, recipe_id: RecipeId, content_type: &str) -> String {
    let ext = ext_from_mime(content_type).unwrap_or("bin");
    format!("{}{}.{}", session_prefix(session_id), recipe_id, ext)
}

/// Stores the image and points the recipe at it. The blob is written before
/// the recipe is touched, so a storage failure leaves the recipe unchanged.
pub async fn attach_image(
    st: &AppState,
    session_id: Uuid,
    recipe_key: &str,
    image: UploadItem<'_>,
) -> Result<ImageRef, AppError> {
    if image.body.is_empty() {
        return Err(AppError::bad_request("image is empty"));
    }
    if !image.content_type.starts_with("image/") {
        return Err(AppError::bad_request(format!(
            "unsupported content type {}",
            image.content_type
        )));
    }

    let recipe_id = st
        .sessions
        .read(session_id, |k| Ok(k.resolve(recipe_key)?.id))
        .await?;

    let key = object_key(session_id, recipe_id, image.content_type);
    st.storage
        .put_object(&key, image.body, image.content_type)
        .await
        .with_context(|| format!("put_object {}", key))
        .map_err(AppError::Storage)?;

    let image_ref = ImageRef {
        key,
        content_type: image.content_type.to_string(),
    };
    let linked = st
        .sessions
        .write(session_id, |k| {
            let recipe = k.resolve_mut(&recipe_id.to_string())?;
            Ok(recipe.image.replace(image_ref.clone()))
        })
        .await;
    let previous = match linked {
        Ok(previous) => previous,
        Err(e) => {
            // session went away mid-upload; its purge has already run
            if let Err(del) = st.storage.delete_object(&image_ref.key).await {
                warn!(error = %del, key = %image_ref.key, "orphaned image not removed");
            }
            return Err(e);
        }
    };

    if let Some(old) = previous.filter(|old| old.key != image_ref.key) {
        if let Err(e) = st.storage.delete_object(&old.key).await {
            warn!(error = %e, key = %old.key, "stale image not removed");
        }
    }
    debug!(%session_id, %recipe_id, key = %image_ref.key, "image attached");
    Ok(image_ref)
}

pub async fn load_image(
    st: &AppState,
    session_id: Uuid,
    recipe_key: &str,
) -> Result<(Bytes, String), AppError> {
    let image = st
        .sessions
        .read(session_id, |k| {
            k.resolve(recipe_key)?
                .image
                .clone()
                .ok_or(AppError::ImageNotFound)
        })
        .await?;
    fetch_required(st.storage.as_ref(), &image.key)
        .await
        .map_err(AppError::Storage)
}

/// Best effort: the session is already gone, so failures are only logged.
pub async fn purge_session_images(st: &AppState, session_id: Uuid) {
    match st.storage.delete_prefix(&session_prefix(session_id)).await {
        Ok(n) => debug!(%session_id, removed = n, "session images purged"),
        Err(e) => warn!(error = %e, %session_id, "session images not purged"),
    }
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}
