use crate::error::AppError;
use crate::recipes::repo::Kitchen;
use crate::recipes::repo_types::{Category, Recipe};

use super::dto::{MenuSlot, MenuView, ScaledIngredient, ScaledRecipe};

pub const EMPTY_VAULT_MESSAGE: &str = "Your vault is empty! Add a recipe to get started.";
/// Slot value meaning "nothing picked".
pub const NO_SELECTION: &str = "None";

/// Headcount for a menu; always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Servings(u32);

impl Servings {
    pub const ONE: Servings = Servings(1);

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Servings {
    type Error = AppError;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        match u32::try_from(v) {
            Ok(n) if n >= 1 => Ok(Servings(n)),
            _ => Err(AppError::bad_request("servings must be at least 1")),
        }
    }
}

pub fn scale_quantity(quantity: f64, servings: Servings) -> f64 {
    quantity * f64::from(servings.get())
}

/// Re-derives the per-serving recipe for `servings` people. Nothing is stored.
pub fn scale_recipe(recipe: &Recipe, servings: Servings) -> ScaledRecipe {
    let ingredients = recipe
        .ingredients
        .iter()
        .map(|line| {
            let quantity = scale_quantity(line.quantity, servings);
            ScaledIngredient {
                display: format!("{}{} {}", quantity, line.unit, line.name),
                quantity,
                unit: line.unit.clone(),
                name: line.name.clone(),
            }
        })
        .collect();
    let total_protein_grams = scale_quantity(recipe.protein_grams_per_serving, servings);

    ScaledRecipe {
        id: recipe.id,
        name: recipe.name.clone(),
        category: recipe.category,
        servings: servings.get(),
        prep_time_minutes: recipe.prep_time_minutes,
        ingredients,
        total_protein_grams,
        protein_display: format!("Protein: {}g", total_protein_grams),
        steps: recipe.visible_steps(),
    }
}

/// Builds today's menu: one slot per category, each optionally showing a
/// scaled recipe. `selections` maps a slot to a recipe id or name.
pub fn plan_menu(
    kitchen: &Kitchen,
    servings: Servings,
    selections: &[(Category, Option<&str>)],
) -> Result<MenuView, AppError> {
    if kitchen.is_empty() {
        return Ok(MenuView {
            servings: servings.get(),
            empty: true,
            message: Some(EMPTY_VAULT_MESSAGE),
            slots: Vec::new(),
        });
    }

    let mut slots = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let key = selections
            .iter()
            .find(|(c, _)| *c == category)
            .and_then(|(_, k)| *k)
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != NO_SELECTION);

        let selected = match key {
            Some(key) => Some(scale_recipe(kitchen.resolve(key)?, servings)),
            None => None,
        };
        slots.push(MenuSlot {
            category,
            options: kitchen.by_category(category).map(|r| r.name.clone()).collect(),
            selected,
        });
    }

    Ok(MenuView {
        servings: servings.get(),
        empty: false,
        message: None,
        slots,
    })
}
