use super::error::RecipeError;
use super::repository;
use crate::shared::normalize::normalize_name;
use contracts::domain::a002_recipe::{RecipeEntry, RecipeRow};
use std::path::Path;

/// Resolves one recipe row: normalizes the product name and derives grams
/// from dose seconds. Missing numeric cells count as 0.
pub fn resolve_row(row: RecipeRow) -> RecipeEntry {
    let powder_seconds = row.powder1_seconds.unwrap_or(0.0) + row.powder2_seconds.unwrap_or(0.0);
    RecipeEntry::new(
        normalize_name(&row.product_name),
        row.ingredients.filter(|s| !s.trim().is_empty()),
        row.bean.unwrap_or(0.0),
        powder_seconds,
        row.syrup_seconds.unwrap_or(0.0),
    )
}

/// Loads and resolves the recipe table of a machine.
///
/// Rows sharing a normalized name are all returned; the join decides what
/// to do with them.
pub fn load_recipe(recipe_dir: &Path, machine_id: &str) -> Result<Vec<RecipeEntry>, RecipeError> {
    let rows = repository::read_recipe_rows(recipe_dir, machine_id)?;
    let entries: Vec<RecipeEntry> = rows.into_iter().map(resolve_row).collect();

    tracing::info!(
        "Loaded recipe for machine {}: {} entries",
        machine_id,
        entries.len()
    );
    Ok(entries)
}
