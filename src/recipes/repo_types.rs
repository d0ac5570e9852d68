use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub type RecipeId = Uuid;

/// Meal slot a recipe belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    #[serde(alias = "breakfast")]
    Breakfast,
    #[serde(alias = "lunch")]
    Lunch,
    #[serde(alias = "dinner")]
    Dinner,
    #[serde(alias = "snack")]
    Snack,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Snack,
    ];
}

/// One ingredient; `quantity` is always the amount for a single serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub key: String,
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub category: Category,
    pub prep_time_minutes: u32,
    pub protein_grams_per_serving: f64,
    pub ingredients: Vec<IngredientLine>,
    /// Stored as entered; blank lines are dropped only when rendering.
    pub steps: Vec<String>,
    pub submitted_by: String,
    pub image: Option<ImageRef>,
    pub likes: u64,
    pub dislikes: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Recipe {
    pub fn visible_steps(&self) -> Vec<String> {
        self.steps
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
