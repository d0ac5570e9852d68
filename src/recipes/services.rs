use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use super::dto::CreateRecipeRequest;
use super::repo_types::{IngredientLine, Recipe};
use crate::error::AppError;

/// Offered for quick selection when entering a recipe.
pub const COMMON_INGREDIENTS: [&str; 11] = [
    "Tofu (Extra Firm)",
    "TVP",
    "Chickpeas",
    "Quinoa",
    "Soy Milk",
    "Oats",
    "Hemp Hearts",
    "Peanut Butter",
    "Greek Yogurt",
    "Sweet Potato",
    "Normandy Veggies",
];

pub(crate) const DEFAULT_UNIT: &str = "serving";

/// Parses a free-text item such as `150g Tofu` or `2 cups Oats`.
/// Anything without a leading amount is one serving of the whole token.
pub fn parse_ingredient_token(token: &str) -> IngredientLine {
    lazy_static! {
        static ref AMOUNT_RE: Regex = Regex::new(
            r"(?i)^(\d+(?:\.\d+)?)\s*(g|kg|mg|ml|l|oz|lbs?|cups?|tbsp|tsp|pinch|cloves?|slices?|cans?|servings?)?\s+(.+)$"
        )
        .unwrap();
    }
    let token = token.trim();
    if let Some(caps) = AMOUNT_RE.captures(token) {
        if let Ok(quantity) = caps[1].parse::<f64>() {
            return IngredientLine {
                name: caps[3].trim().to_string(),
                quantity,
                unit: caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
            };
        }
    }
    IngredientLine {
        name: token.to_string(),
        quantity: 1.0,
        unit: DEFAULT_UNIT.to_string(),
    }
}

/// Splits a comma separated list, dropping blank entries.
pub fn split_items(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn check_amount(what: &str, v: f64) -> Result<(), AppError> {
    if !v.is_finite() || v < 0.0 {
        return Err(AppError::bad_request(format!(
            "{} must be a non-negative number",
            what
        )));
    }
    Ok(())
}

/// Validates a submission and turns it into a stored recipe.
pub fn build_recipe(req: CreateRecipeRequest) -> Result<Recipe, AppError> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::bad_request("recipe name is required"));
    }
    check_amount("protein_grams_per_serving", req.protein_grams_per_serving)?;

    let mut ingredients = Vec::with_capacity(req.ingredients.len() + req.common_items.len());
    for line in req.ingredients {
        let line_name = line.name.trim();
        if line_name.is_empty() {
            return Err(AppError::bad_request("ingredient name is required"));
        }
        check_amount(&format!("quantity of {}", line_name), line.quantity)?;
        ingredients.push(IngredientLine {
            name: line_name.to_string(),
            quantity: line.quantity,
            unit: line.unit.trim().to_string(),
        });
    }
    ingredients.extend(
        req.common_items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|item| IngredientLine {
                name: item.to_string(),
                quantity: 1.0,
                unit: DEFAULT_UNIT.to_string(),
            }),
    );
    if let Some(other) = req.other_items.as_deref() {
        ingredients.extend(split_items(other).map(parse_ingredient_token));
    }

    let steps = req
        .steps
        .as_deref()
        .map(|text| text.lines().map(str::to_string).collect())
        .unwrap_or_default();

    debug!(%name, ingredients = ingredients.len(), "recipe built");
    Ok(Recipe {
        id: Uuid::new_v4(),
        name,
        category: req.category,
        prep_time_minutes: req.prep_time_minutes,
        protein_grams_per_serving: req.protein_grams_per_serving,
        ingredients,
        steps,
        submitted_by: req.submitted_by.unwrap_or_default(),
        image: None,
        likes: 0,
        dislikes: 0,
        created_at: OffsetDateTime::now_utc(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::repo_types::Category;

    fn request(name: &str) -> CreateRecipeRequest {
        CreateRecipeRequest {
            name: name.into(),
            category: Category::Breakfast,
            prep_time_minutes: 5,
            protein_grams_per_serving: 20.0,
            ingredients: Vec::new(),
            common_items: Vec::new(),
            other_items: None,
            steps: None,
            submitted_by: None,
        }
    }

    #[test]
    fn parses_amount_and_unit() {
        let l = parse_ingredient_token(" 150g Tofu ");
        assert_eq!((l.quantity, l.unit.as_str(), l.name.as_str()), (150.0, "g", "Tofu"));

        let l = parse_ingredient_token("2 cups Rolled Oats");
        assert_eq!((l.quantity, l.unit.as_str(), l.name.as_str()), (2.0, "cups", "Rolled Oats"));

        let l = parse_ingredient_token("0.5 Lemon");
        assert_eq!((l.quantity, l.unit.as_str(), l.name.as_str()), (0.5, "", "Lemon"));
    }

    #[test]
    fn plain_token_is_one_serving() {
        let l = parse_ingredient_token("Beans");
        assert_eq!(l.name, "Beans");
        assert_eq!(l.quantity, 1.0);
        assert_eq!(l.unit, DEFAULT_UNIT);
    }

    #[test]
    fn split_items_trims_and_skips_blanks() {
        let items: Vec<_> = split_items(" Rice, Beans ,, ").collect();
        assert_eq!(items, ["Rice", "Beans"]);
    }

    #[test]
    fn build_merges_all_ingredient_sources_in_order() {
        let mut req = request("Tofu Scramble");
        req.ingredients.push(IngredientLine {
            name: "Tofu".into(),
            quantity: 150.0,
            unit: "g".into(),
        });
        req.common_items = vec!["Hemp Hearts".into()];
        req.other_items = Some("Spinach, 1 tsp Turmeric".into());
        req.steps = Some("Crumble tofu\n\nFry it\r\n".into());

        let r = build_recipe(req).unwrap();
        let names: Vec<_> = r.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Tofu", "Hemp Hearts", "Spinach", "Turmeric"]);
        assert_eq!(r.steps, ["Crumble tofu", "", "Fry it"]);
        assert_eq!(r.visible_steps(), ["Crumble tofu", "Fry it"]);
        assert_eq!((r.likes, r.dislikes), (0, 0));
    }

    #[test]
    fn build_rejects_blank_name_and_negative_amounts() {
        assert!(matches!(build_recipe(request("   ")), Err(AppError::BadRequest(_))));

        let mut req = request("Shake");
        req.protein_grams_per_serving = -1.0;
        assert!(matches!(build_recipe(req), Err(AppError::BadRequest(_))));

        let mut req = request("Shake");
        req.ingredients.push(IngredientLine {
            name: "Milk".into(),
            quantity: f64::NAN,
            unit: "ml".into(),
        });
        assert!(matches!(build_recipe(req), Err(AppError::BadRequest(_))));
    }
}
