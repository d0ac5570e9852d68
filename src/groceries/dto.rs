use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GroceryRequest {
    /// Recipe ids or names.
    #[serde(default)]
    pub recipes: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GroceryItem {
    pub name: String,
    pub checked: bool,
}

#[derive(Debug, Serialize)]
pub struct GroceryList {
    pub items: Vec<GroceryItem>,
}
