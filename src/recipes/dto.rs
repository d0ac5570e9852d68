use serde::{Deserialize, Serialize};

use super::repo_types::{Category, Comment, IngredientLine, Recipe};

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub prep_time_minutes: u32,
    #[serde(default)]
    pub protein_grams_per_serving: f64,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    /// Picks from the common ingredient list.
    #[serde(default)]
    pub common_items: Vec<String>,
    /// Comma separated free text, e.g. `"150g Tofu, Spinach"`.
    pub other_items: Option<String>,
    /// One instruction per line.
    pub steps: Option<String>,
    pub submitted_by: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecipeList {
    pub recipes: Vec<Recipe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct RecipeDetails {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub visible_steps: Vec<String>,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Serialize)]
pub struct CommonIngredients {
    pub items: Vec<&'static str>,
}
