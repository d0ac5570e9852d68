use axum::{extract::State, routing::post, Json, Router};
use tracing::{debug, instrument};

use super::dto::{GroceryItem, GroceryList, GroceryRequest};
use super::services::aggregate;
use crate::{error::AppError, sessions::extractors::SessionId, state::AppState};

pub fn grocery_routes() -> Router<AppState> {
    Router::new().route("/groceries", post(grocery_list))
}

#[instrument(skip(state))]
pub async fn grocery_list(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(body): Json<GroceryRequest>,
) -> Result<Json<GroceryList>, AppError> {
    let names = state
        .sessions
        .read(session_id, |k| aggregate(k, &body.recipes))
        .await?;
    debug!(%session_id, selected = body.recipes.len(), items = names.len(), "grocery list built");

    let items = names
        .into_iter()
        .map(|name| GroceryItem {
            name,
            checked: false,
        })
        .collect();
    Ok(Json(GroceryList { items }))
}
