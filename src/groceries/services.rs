use std::collections::BTreeSet;

use crate::error::AppError;
use crate::recipes::repo::Kitchen;

/// Collects the ingredient names of every selected recipe into one sorted,
/// duplicate-free list. Matching is by exact name; quantities and units are
/// ignored.
pub fn aggregate<S: AsRef<str>>(kitchen: &Kitchen, selected: &[S]) -> Result<Vec<String>, AppError> {
    let mut names = BTreeSet::new();
    for key in selected {
        let recipe = kitchen.resolve(key.as_ref())?;
        names.extend(
            recipe
                .ingredients
                .iter()
                .map(|line| line.name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        );
    }
    Ok(names.into_iter().collect())
}
