use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::recipes::repo_types::Category;

#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub servings: Option<i64>,
    pub breakfast: Option<String>,
    pub lunch: Option<String>,
    pub dinner: Option<String>,
    pub snack: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScaledIngredient {
    pub quantity: f64,
    pub unit: String,
    pub name: String,
    pub display: String,
}

#[derive(Debug, Serialize)]
pub struct ScaledRecipe {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub servings: u32,
    pub prep_time_minutes: u32,
    pub ingredients: Vec<ScaledIngredient>,
    pub total_protein_grams: f64,
    pub protein_display: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct MenuSlot {
    pub category: Category,
    pub options: Vec<String>,
    pub selected: Option<ScaledRecipe>,
}

#[derive(Debug, Serialize)]
pub struct MenuView {
    pub servings: u32,
    pub empty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub slots: Vec<MenuSlot>,
}
