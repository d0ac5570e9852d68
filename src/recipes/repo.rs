use std::collections::HashMap;

use uuid::Uuid;

use super::repo_types::{Category, Comment, Recipe, RecipeId};
use crate::error::AppError;

/// Everything one session owns: the recipe vault and per-recipe comment threads.
#[derive(Debug, Default)]
pub struct Kitchen {
    recipes: Vec<Recipe>,
    comments: HashMap<RecipeId, Vec<Comment>>,
}

impl Kitchen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Appends a recipe. Names are the user-facing selection key and must be unique.
    pub fn insert(&mut self, recipe: Recipe) -> Result<&Recipe, AppError> {
        if self.recipes.iter().any(|r| r.name == recipe.name) {
            return Err(AppError::DuplicateName(recipe.name));
        }
        self.recipes.push(recipe);
        Ok(&self.recipes[self.recipes.len() - 1])
    }

    fn position(&self, key: &str) -> Option<usize> {
        let key = key.trim();
        if let Ok(id) = Uuid::parse_str(key) {
            if let Some(i) = self.recipes.iter().position(|r| r.id == id) {
                return Some(i);
            }
        }
        self.recipes.iter().position(|r| r.name == key)
    }

    /// Looks a recipe up by id, falling back to its exact name.
    pub fn find(&self, key: &str) -> Option<&Recipe> {
        self.position(key).map(|i| &self.recipes[i])
    }

    pub fn resolve(&self, key: &str) -> Result<&Recipe, AppError> {
        self.find(key)
            .ok_or_else(|| AppError::RecipeNotFound(key.to_string()))
    }

    pub fn resolve_mut(&mut self, key: &str) -> Result<&mut Recipe, AppError> {
        match self.position(key) {
            Some(i) => Ok(&mut self.recipes[i]),
            None => Err(AppError::RecipeNotFound(key.to_string())),
        }
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter().filter(move |r| r.category == category)
    }

    pub fn comments(&self, id: RecipeId) -> &[Comment] {
        self.comments.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn push_comment(&mut self, id: RecipeId, comment: Comment) -> &[Comment] {
        let thread = self.comments.entry(id).or_default();
        thread.push(comment);
        thread
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use time::OffsetDateTime;
    use uuid::Uuid;

    use crate::recipes::repo_types::{Category, IngredientLine, Recipe};

    pub fn recipe(name: &str, category: Category, ingredients: &[(&str, f64, &str)]) -> Recipe {
        Recipe {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category,
            prep_time_minutes: 10,
            protein_grams_per_serving: 0.0,
            ingredients: ingredients
                .iter()
                .map(|(n, q, u)| IngredientLine {
                    name: n.to_string(),
                    quantity: *q,
                    unit: u.to_string(),
                })
                .collect(),
            steps: Vec::new(),
            submitted_by: String::new(),
            image: None,
            likes: 0,
            dislikes: 0,
            created_at: OffsetDateTime::now_utc(),
        }
    }
}
