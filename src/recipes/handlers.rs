use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{CommonIngredients, CreateRecipeRequest, RecipeDetails, RecipeList};
use super::repo_types::Recipe;
use super::services::{build_recipe, COMMON_INGREDIENTS};
use crate::{error::AppError, sessions::extractors::SessionId, state::AppState};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/:key", get(get_recipe))
        .route("/ingredients/common", get(common_ingredients))
}

// --- handlers ---

#[instrument(skip(state, body))]
pub async fn create_recipe(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(body): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, HeaderMap, Json<Recipe>), AppError> {
    let recipe = build_recipe(body)?;
    let stored = state
        .sessions
        .write(session_id, |k| k.insert(recipe).cloned())
        .await?;

    info!(%session_id, recipe_id = %stored.id, name = %stored.name, "recipe saved");

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/v1/recipes/{}", stored.id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(stored)))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<RecipeList>, AppError> {
    let recipes = state
        .sessions
        .read(session_id, |k| Ok(k.recipes().to_vec()))
        .await?;
    let message = recipes.is_empty().then_some("No recipes found.");
    Ok(Json(RecipeList { recipes, message }))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(key): Path<String>,
) -> Result<Json<RecipeDetails>, AppError> {
    let details = state
        .sessions
        .read(session_id, |k| {
            let recipe = k.resolve(&key)?;
            Ok(RecipeDetails {
                visible_steps: recipe.visible_steps(),
                comments: k.comments(recipe.id).to_vec(),
                recipe: recipe.clone(),
            })
        })
        .await?;
    Ok(Json(details))
}

pub async fn common_ingredients() -> Json<CommonIngredients> {
    Json(CommonIngredients {
        items: COMMON_INGREDIENTS.to_vec(),
    })
}
