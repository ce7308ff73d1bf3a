use crate::enums::ingredient::IngredientFamily;
use serde::{Deserialize, Serialize};

/// Row of a machine recipe table, after column mapping.
/// Empty cells stay None.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeRow {
    pub product_name: String,
    pub ingredients: Option<String>,
    pub bean: Option<f64>,
    pub powder1_seconds: Option<f64>,
    pub powder2_seconds: Option<f64>,
    pub syrup_seconds: Option<f64>,
}

/// Resolved per-serving dosing of one product on one machine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeEntry {
    /// Normalized product name used as the join key
    pub product_name: String,
    /// Comma-separated ingredient display names
    pub ingredients: Option<String>,
    /// Bean grams per serving
    pub bean: f64,
    pub powder_dose_seconds: f64,
    pub syrup_dose_seconds: f64,
    pub powder_grams: f64,
    pub syrup_grams: f64,
}

impl RecipeEntry {
    /// Builds an entry and derives grams from dose seconds.
    /// `product_name` must already be normalized.
    pub fn new(
        product_name: impl Into<String>,
        ingredients: Option<String>,
        bean: f64,
        powder_dose_seconds: f64,
        syrup_dose_seconds: f64,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            ingredients,
            bean,
            powder_dose_seconds,
            syrup_dose_seconds,
            powder_grams: powder_dose_seconds * IngredientFamily::Powder.grams_per_second(),
            syrup_grams: syrup_dose_seconds * IngredientFamily::Syrup.grams_per_second(),
        }
    }

    /// Per-serving grams of the given family
    pub fn family_grams(&self, family: IngredientFamily) -> f64 {
        match family {
            IngredientFamily::Powder => self.powder_grams,
            IngredientFamily::Syrup => self.syrup_grams,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grams_derived_from_dose() {
        let entry = RecipeEntry::new("latte", Some("밀크 파우더".into()), 18.0, 10.0, 20.0);
        assert!((entry.powder_grams - 64.0).abs() < 1e-9);
        assert!((entry.syrup_grams - 68.0).abs() < 1e-9);
        assert_eq!(entry.family_grams(IngredientFamily::Syrup), entry.syrup_grams);
    }
}
