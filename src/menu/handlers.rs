use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument};

use super::dto::{MenuQuery, MenuView};
use super::services::{plan_menu, Servings};
use crate::{
    error::AppError, recipes::repo_types::Category, sessions::extractors::SessionId,
    state::AppState,
};

pub fn menu_routes() -> Router<AppState> {
    Router::new().route("/menu", get(todays_menu))
}

#[instrument(skip(state))]
pub async fn todays_menu(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Query(q): Query<MenuQuery>,
) -> Result<Json<MenuView>, AppError> {
    let servings = match q.servings {
        Some(n) => Servings::try_from(n)?,
        None => Servings::ONE,
    };
    let selections = [
        (Category::Breakfast, q.breakfast.as_deref()),
        (Category::Lunch, q.lunch.as_deref()),
        (Category::Dinner, q.dinner.as_deref()),
        (Category::Snack, q.snack.as_deref()),
    ];

    let view = state
        .sessions
        .read(session_id, |k| plan_menu(k, servings, &selections))
        .await?;
    debug!(%session_id, servings = servings.get(), empty = view.empty, "menu planned");
    Ok(Json(view))
}
